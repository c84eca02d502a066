//! Math utilities and types
//!
//! Provides the nalgebra aliases used across the engine plus the Euler-angle
//! [`Transform`] that every scene object carries.

pub use nalgebra::{
    Vector3, Vector4,
    Matrix3, Matrix4,
    Quaternion, Rotation3,
    Unit,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type (colors, homogeneous coordinates)
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Squared length below which a vector is treated as zero
pub const EPSILON_SQUARED: f32 = 1e-12;

/// Local transform: position, Euler rotation (radians) and scale
///
/// The local matrix is rebuilt on every mutation and is always composed in
/// the same order: scale first, then rotation about X, Y and Z, then
/// translation (`T * Rz * Ry * Rx * S` with column vectors).
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    position: Vec3,
    rotation: Vec3,
    scale: Vec3,
    matrix: Mat4,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(Vec3::zeros(), Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0))
    }
}

impl Transform {
    /// Create a transform from position, Euler rotation and scale
    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
            matrix: compose_matrix(&position, &rotation, &scale),
        }
    }

    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self::new(position, Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0))
    }

    /// Decompose an affine matrix into position, Euler rotation and scale
    ///
    /// Shear introduced by non-uniform scaling under rotation is dropped.
    pub fn from_matrix(matrix: &Mat4) -> Self {
        let position = translation_of(matrix);

        let basis = matrix.fixed_view::<3, 3>(0, 0).into_owned();
        let scale = Vec3::new(
            basis.column(0).magnitude(),
            basis.column(1).magnitude(),
            basis.column(2).magnitude(),
        );

        let rotation = euler_from_basis(&orthonormalize(&basis));
        Self::new(position, rotation, scale)
    }

    /// Local position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Euler rotation in radians (X, Y, Z)
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Scale factors
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Composed local matrix
    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }

    /// Rotation as a quaternion
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler_angles(self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Set the position
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.recompute();
    }

    /// Set the Euler rotation
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.recompute();
    }

    /// Set the scale
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.recompute();
    }

    /// Offset the position
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
        self.recompute();
    }

    /// Add to the Euler rotation
    pub fn rotate(&mut self, delta: Vec3) {
        self.rotation += delta;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.matrix = compose_matrix(&self.position, &self.rotation, &self.scale);
    }
}

/// Build `T * Rz * Ry * Rx * S`
pub fn compose_matrix(position: &Vec3, rotation: &Vec3, scale: &Vec3) -> Mat4 {
    Mat4::new_translation(position)
        * rotation_matrix(rotation).to_homogeneous()
        * Mat4::new_nonuniform_scaling(scale)
}

/// Rotation matrix for Euler angles applied X first, then Y, then Z
pub fn rotation_matrix(rotation: &Vec3) -> Rotation3<f32> {
    Rotation3::from_euler_angles(rotation.x, rotation.y, rotation.z)
}

/// Euler angles (X, Y, Z) of an orthonormal basis
pub fn euler_from_basis(basis: &Mat3) -> Vec3 {
    let (x, y, z) = Rotation3::from_matrix_unchecked(*basis).euler_angles();
    Vec3::new(x, y, z)
}

/// Translation column of an affine matrix
pub fn translation_of(matrix: &Mat4) -> Vec3 {
    Vec3::new(matrix[(0, 3)], matrix[(1, 3)], matrix[(2, 3)])
}

/// Normalize each column of a basis, substituting the canonical axis for
/// degenerate (zero-scale) columns
pub fn orthonormalize(basis: &Mat3) -> Mat3 {
    let mut result = Mat3::identity();
    for i in 0..3 {
        let column: Vec3 = basis.column(i).into_owned();
        if let Some(unit) = safe_normalize(&column) {
            result.set_column(i, &unit);
        }
    }
    result
}

/// Normalize a vector, or `None` when it is too short to have a direction
pub fn safe_normalize(v: &Vec3) -> Option<Vec3> {
    let length_squared = v.magnitude_squared();
    if length_squared <= EPSILON_SQUARED {
        None
    } else {
        Some(v / length_squared.sqrt())
    }
}

/// Rigid world-space placement: origin plus orthonormal axes
///
/// Colliders are projected into world space through a pose so that their
/// dimensions stay in world units regardless of the owner's scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// World position of the origin
    pub position: Vec3,
    /// Orthonormal basis; columns are the local X, Y and Z axes
    pub basis: Mat3,
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl Pose {
    /// Pose at the origin with world axes
    pub fn identity() -> Self {
        Self {
            position: Vec3::zeros(),
            basis: Mat3::identity(),
        }
    }

    /// Pose at a position with world axes
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            basis: Mat3::identity(),
        }
    }

    /// Pose at a position with an Euler rotation
    pub fn from_position_rotation(position: Vec3, rotation: Vec3) -> Self {
        Self {
            position,
            basis: *rotation_matrix(&rotation).matrix(),
        }
    }

    /// Extract the pose of an affine world matrix (scale removed)
    pub fn from_matrix(matrix: &Mat4) -> Self {
        Self {
            position: translation_of(matrix),
            basis: orthonormalize(&matrix.fixed_view::<3, 3>(0, 0).into_owned()),
        }
    }

    /// Local axis `index` (0 = X, 1 = Y, 2 = Z) in world space
    pub fn axis(&self, index: usize) -> Vec3 {
        self.basis.column(index).into_owned()
    }

    /// Map a local point into world space
    pub fn transform_point(&self, local: &Vec3) -> Vec3 {
        self.position + self.basis * local
    }

    /// Rotate a local direction into world space
    pub fn transform_vector(&self, local: &Vec3) -> Vec3 {
        self.basis * local
    }

    /// Rotation as a quaternion
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_rotation_matrix(&Rotation3::from_matrix_unchecked(self.basis))
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;
}
