use crate::error::Error;

/// Conversion densities shared by every measurement in a report.
///
/// Lengths move between three spaces: device pixels, typographic points, and
/// "standard" units (inches). Both densities are fixed once a report is
/// configured; conversions themselves can never fail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Density {
    px_per_inch: f32,
    pts_per_inch: f32,
}

impl Density {
    pub fn new(px_per_inch: f32, pts_per_inch: f32) -> Result<Self, Error> {
        // `!(x > 0.0)` also rejects NaN
        if !(px_per_inch > 0.0) || !(pts_per_inch > 0.0) {
            return Err(Error::Config(format!(
                "densities must be positive, got {px_per_inch} px/in, {pts_per_inch} pt/in"
            )));
        }
        Ok(Self {
            px_per_inch,
            pts_per_inch,
        })
    }

    pub fn px_per_inch(self) -> f32 {
        self.px_per_inch
    }

    pub fn pts_per_inch(self) -> f32 {
        self.pts_per_inch
    }

    pub fn px_to_std(self, px: f32) -> f32 {
        px / self.px_per_inch
    }

    pub fn std_to_px(self, std: f32) -> f32 {
        std * self.px_per_inch
    }

    pub fn points_to_std(self, pts: f32) -> f32 {
        pts / self.pts_per_inch
    }

    pub fn std_to_points(self, std: f32) -> f32 {
        std * self.pts_per_inch
    }
}

impl Default for Density {
    /// 300 px/in screenshots on a 72 pt/in page.
    fn default() -> Self {
        Self {
            px_per_inch: 300.0,
            pts_per_inch: 72.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_round_trip() {
        let d = Density::new(300.0, 72.0).unwrap();
        for x in [1.0f32, 17.5, 435.0, 2000.0, 0.25] {
            assert!((d.std_to_px(d.px_to_std(x)) - x).abs() < 1e-3);
            assert!((d.std_to_points(d.points_to_std(x)) - x).abs() < 1e-3);
        }
    }

    #[test]
    fn px_and_points_meet_in_std() {
        let d = Density::new(200.0, 72.0).unwrap();
        // 200 px and 72 pt are both exactly one inch
        assert_eq!(d.px_to_std(200.0), 1.0);
        assert_eq!(d.points_to_std(72.0), 1.0);
    }

    #[test]
    fn rejects_non_positive_densities() {
        assert!(Density::new(0.0, 72.0).is_err());
        assert!(Density::new(300.0, -72.0).is_err());
        assert!(Density::new(f32::NAN, 72.0).is_err());
    }
}
