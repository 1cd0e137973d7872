//! Vectors, rotations and the instantaneous field frame

mod three_vector;
mod rotation;

pub use self::three_vector::*;
pub use self::rotation::*;

/// The field frame (FF) attached to the instantaneous laser electric
/// field (F_x, F_y) at a real birth time: x points along the
/// tunneling-exit direction -F, z along the lab z-axis, and y = z × x.
#[derive(Clone, Copy, Debug)]
pub struct FieldFrame {
    f_x: f64,
    f_y: f64,
    magnitude: f64,
    exit_azimuth: f64,
    rotation: Rotation,
}

impl FieldFrame {
    /// Builds the frame for the field components at the birth time.
    pub fn new(f_x: f64, f_y: f64) -> Self {
        let magnitude = f_x.hypot(f_y);
        let exit_azimuth = (-f_y).atan2(-f_x);
        FieldFrame {
            f_x,
            f_y,
            magnitude,
            exit_azimuth,
            // columns are the triad (x_FF, y_FF, z_FF) in lab coordinates
            rotation: Rotation::about_z(exit_azimuth),
        }
    }

    /// The lab-frame field components this frame was built from.
    pub fn field(&self) -> (f64, f64) {
        (self.f_x, self.f_y)
    }

    /// The instantaneous field strength F.
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// The azimuth of the tunneling exit, atan2(-F_y, -F_x).
    pub fn exit_azimuth(&self) -> f64 {
        self.exit_azimuth
    }

    /// Unit vector along the tunneling-exit direction, -F/|F|.
    pub fn x_axis(&self) -> ThreeVector {
        self.rotation.column(0)
    }

    pub fn y_axis(&self) -> ThreeVector {
        self.rotation.column(1)
    }

    pub fn z_axis(&self) -> ThreeVector {
        self.rotation.column(2)
    }

    /// The z-y-z Euler angles that rotate the target orbital into this
    /// frame: the angles of R_FF^T R_MF, where R_MF is the rotation built
    /// from the target's `orientation()`. Feeding these to the Wigner-D
    /// elements turns molecular-frame expansion coefficients into
    /// field-frame ones.
    pub fn orbital_euler_angles(&self, orientation: (f64, f64, f64)) -> (f64, f64, f64) {
        let (alpha, beta, gamma) = orientation;
        let r_mf = Rotation::from_euler(alpha, beta, gamma);
        (self.rotation.transpose() * r_mf).euler_angles()
    }
}
