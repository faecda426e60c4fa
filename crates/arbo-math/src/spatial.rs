//! 6D spatial vectors and matrices.
//!
//! A spatial motion vector (twist) is [ω; v]; a spatial force vector
//! (wrench) is [τ; f]. Both are represented by [`SpatialVec`] — which of
//! the two a value means is determined by context, matching Featherstone's
//! presentation.

use crate::{Mat6, Vec3, Vec6};

/// A 6D spatial vector with separate angular and linear parts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialVec {
    /// Angular part (ω for motion, τ for force).
    pub ang: Vec3,
    /// Linear part (v for motion, f for force).
    pub lin: Vec3,
}

impl SpatialVec {
    /// Build from angular and linear parts.
    #[inline]
    pub fn new(ang: Vec3, lin: Vec3) -> Self {
        Self { ang, lin }
    }

    /// The zero vector.
    #[inline]
    pub fn zero() -> Self {
        Self {
            ang: Vec3::zeros(),
            lin: Vec3::zeros(),
        }
    }

    /// Stack into a plain 6D column vector [ang; lin].
    #[inline]
    pub fn to_vec6(&self) -> Vec6 {
        Vec6::new(
            self.ang.x, self.ang.y, self.ang.z, self.lin.x, self.lin.y, self.lin.z,
        )
    }

    /// Split a plain 6D column vector back into angular/linear parts.
    #[inline]
    pub fn from_vec6(v: &Vec6) -> Self {
        Self {
            ang: Vec3::new(v[0], v[1], v[2]),
            lin: Vec3::new(v[3], v[4], v[5]),
        }
    }

    /// Motion-space cross product `self ×ₘ other`, used in velocity
    /// propagation and Coriolis terms.
    pub fn cross_motion(&self, other: &SpatialVec) -> SpatialVec {
        SpatialVec {
            ang: self.ang.cross(&other.ang),
            lin: self.ang.cross(&other.lin) + self.lin.cross(&other.ang),
        }
    }

    /// Force-space cross product `self ×f other`, used for the gyroscopic
    /// bias wrench `v ×f (I v)`.
    pub fn cross_force(&self, other: &SpatialVec) -> SpatialVec {
        SpatialVec {
            ang: self.ang.cross(&other.ang) + self.lin.cross(&other.lin),
            lin: self.ang.cross(&other.lin),
        }
    }

    /// Scalar product. Pairs a motion vector with a force vector.
    #[inline]
    pub fn dot(&self, other: &SpatialVec) -> f64 {
        self.ang.dot(&other.ang) + self.lin.dot(&other.lin)
    }

    /// True when every component is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.ang.iter().chain(self.lin.iter()).all(|x| x.is_finite())
    }
}

impl std::ops::Add for SpatialVec {
    type Output = SpatialVec;
    #[inline]
    fn add(self, rhs: SpatialVec) -> SpatialVec {
        SpatialVec {
            ang: self.ang + rhs.ang,
            lin: self.lin + rhs.lin,
        }
    }
}

impl std::ops::Sub for SpatialVec {
    type Output = SpatialVec;
    #[inline]
    fn sub(self, rhs: SpatialVec) -> SpatialVec {
        SpatialVec {
            ang: self.ang - rhs.ang,
            lin: self.lin - rhs.lin,
        }
    }
}

impl std::ops::Neg for SpatialVec {
    type Output = SpatialVec;
    #[inline]
    fn neg(self) -> SpatialVec {
        SpatialVec {
            ang: -self.ang,
            lin: -self.lin,
        }
    }
}

impl std::ops::Mul<f64> for SpatialVec {
    type Output = SpatialVec;
    #[inline]
    fn mul(self, rhs: f64) -> SpatialVec {
        SpatialVec {
            ang: self.ang * rhs,
            lin: self.lin * rhs,
        }
    }
}

/// A 6x6 spatial matrix (articulated inertia, Plücker transform matrices).
#[derive(Debug, Clone, Copy)]
pub struct SpatialMat(pub Mat6);

impl SpatialMat {
    #[inline]
    pub fn from_mat6(m: Mat6) -> Self {
        Self(m)
    }

    #[inline]
    pub fn zero() -> Self {
        Self(Mat6::zeros())
    }

    #[inline]
    pub fn identity() -> Self {
        Self(Mat6::identity())
    }

    /// Apply to a spatial vector.
    #[inline]
    pub fn mul_vec(&self, v: &SpatialVec) -> SpatialVec {
        SpatialVec::from_vec6(&(self.0 * v.to_vec6()))
    }

    #[inline]
    pub fn transpose(&self) -> SpatialMat {
        Self(self.0.transpose())
    }

    /// Rank-one update term `a bᵀ`.
    pub fn outer(a: &SpatialVec, b: &SpatialVec) -> SpatialMat {
        Self(a.to_vec6() * b.to_vec6().transpose())
    }

    /// Multiply every entry by `k`.
    #[inline]
    pub fn scale(&self, k: f64) -> SpatialMat {
        Self(self.0 * k)
    }
}

impl std::ops::Add for SpatialMat {
    type Output = SpatialMat;
    #[inline]
    fn add(self, rhs: SpatialMat) -> SpatialMat {
        SpatialMat(self.0 + rhs.0)
    }
}

impl std::ops::Sub for SpatialMat {
    type Output = SpatialMat;
    #[inline]
    fn sub(self, rhs: SpatialMat) -> SpatialMat {
        SpatialMat(self.0 - rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cross_motion_of_unit_axes() {
        let z = SpatialVec::new(Vec3::z(), Vec3::zeros());
        let x = SpatialVec::new(Vec3::x(), Vec3::zeros());
        let r = z.cross_motion(&x);
        assert_relative_eq!(r.ang, Vec3::y(), epsilon = 1e-12);
        assert_relative_eq!(r.lin, Vec3::zeros(), epsilon = 1e-12);
    }

    #[test]
    fn dot_pairs_angular_with_angular() {
        let s = SpatialVec::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0));
        let f = SpatialVec::new(Vec3::new(6.0, 5.0, 4.0), Vec3::new(3.0, 2.0, 1.0));
        assert_relative_eq!(s.dot(&f), 6.0 + 10.0 + 12.0 + 12.0 + 10.0 + 6.0);
    }

    #[test]
    fn vec6_roundtrip() {
        let v = SpatialVec::new(Vec3::new(1.0, -2.0, 3.0), Vec3::new(0.5, 0.0, -7.0));
        let back = SpatialVec::from_vec6(&v.to_vec6());
        assert_eq!(v, back);
    }

    #[test]
    fn outer_applied_to_vector_matches_scaled_column() {
        let a = SpatialVec::new(Vec3::new(1.0, 0.0, 2.0), Vec3::new(0.0, 1.0, 0.0));
        let b = SpatialVec::new(Vec3::new(0.0, 3.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        let c = SpatialVec::new(Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        let lhs = SpatialMat::outer(&a, &b).mul_vec(&c);
        let expect = a * b.dot(&c);
        assert_relative_eq!(lhs.to_vec6(), expect.to_vec6(), epsilon = 1e-12);
    }
}
