//! Rigid-body mass properties in spatial form.

use crate::{Mat3, Mat6, SpatialMat, Vec3, skew};

/// Mass, center of mass, and rotational inertia of a rigid body,
/// expressed in the body's own frame.
#[derive(Debug, Clone, Copy)]
pub struct SpatialInertia {
    pub mass: f64,
    /// Center of mass offset from the body frame origin.
    pub com: Vec3,
    /// Rotational inertia about the center of mass.
    pub inertia: Mat3,
}

impl SpatialInertia {
    pub fn new(mass: f64, com: Vec3, inertia: Mat3) -> Self {
        Self { mass, com, inertia }
    }

    /// A point mass at `pos` relative to the body frame origin.
    pub fn point_mass(mass: f64, pos: Vec3) -> Self {
        Self {
            mass,
            com: pos,
            inertia: Mat3::zeros(),
        }
    }

    /// Uniform thin rod of the given mass and length, lying along the
    /// body frame's Y axis and centered at the origin.
    pub fn rod(mass: f64, length: f64) -> Self {
        let i = mass * length * length / 12.0;
        Self {
            mass,
            com: Vec3::zeros(),
            inertia: Mat3::from_diagonal(&Vec3::new(i, 0.0, i)),
        }
    }

    /// Uniform solid sphere centered at the origin.
    pub fn sphere(mass: f64, radius: f64) -> Self {
        let i = 0.4 * mass * radius * radius;
        Self {
            mass,
            com: Vec3::zeros(),
            inertia: Mat3::from_diagonal(&Vec3::new(i, i, i)),
        }
    }

    /// The 6x6 spatial inertia about the body frame origin:
    ///
    /// ```text
    /// I = | Ic + m [c]×[c]×ᵀ   m [c]× |
    ///     | m [c]×ᵀ            m E    |
    /// ```
    pub fn to_matrix(&self) -> SpatialMat {
        let m = self.mass;
        let cx = skew(&self.com);

        let mut out = Mat6::zeros();
        out.fixed_view_mut::<3, 3>(0, 0)
            .copy_from(&(self.inertia + cx * cx.transpose() * m));
        out.fixed_view_mut::<3, 3>(0, 3).copy_from(&(cx * m));
        out.fixed_view_mut::<3, 3>(3, 0)
            .copy_from(&(cx.transpose() * m));
        out.fixed_view_mut::<3, 3>(3, 3)
            .copy_from(&(Mat3::identity() * m));
        SpatialMat::from_mat6(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SpatialVec;
    use approx::assert_relative_eq;

    #[test]
    fn matrix_is_symmetric() {
        let si = SpatialInertia::new(
            2.5,
            Vec3::new(0.1, -0.2, 0.3),
            Mat3::from_diagonal(&Vec3::new(0.4, 0.5, 0.6)),
        );
        let m = si.to_matrix().0;
        assert_relative_eq!(m, m.transpose(), epsilon = 1e-12);
    }

    #[test]
    fn pure_translation_momentum_is_m_v() {
        let si = SpatialInertia::sphere(3.0, 0.2);
        let twist = SpatialVec::new(Vec3::zeros(), Vec3::new(1.0, 2.0, 3.0));
        let h = si.to_matrix().mul_vec(&twist);
        assert_relative_eq!(h.lin, Vec3::new(3.0, 6.0, 9.0), epsilon = 1e-12);
        assert_relative_eq!(h.ang, Vec3::zeros(), epsilon = 1e-12);
    }

    #[test]
    fn rod_kinetic_energy_about_end() {
        // Rod along Y centered at com = (0, -L/2, 0) from the pivot frame:
        // spinning about the pivot's Z at 1 rad/s, KE = 0.5 * (mL²/3).
        let (mass, length) = (1.0, 1.0);
        let mut si = SpatialInertia::rod(mass, length);
        si.com = Vec3::new(0.0, -length / 2.0, 0.0);
        let twist = SpatialVec::new(Vec3::z(), Vec3::zeros());
        let ke = 0.5 * twist.dot(&si.to_matrix().mul_vec(&twist));
        assert_relative_eq!(ke, 0.5 * mass * length * length / 3.0, epsilon = 1e-12);
    }
}
