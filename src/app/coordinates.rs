// One degree of arc expressed in statute miles (60 nautical miles)
const MILES_PER_DEGREE: f64 = 60_f64 * 1.1515_f64;
const KILOMETERS_PER_MILE: f64 = 1.609344_f64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Coordinates {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance in kilometers on a spherical Earth, using the
    /// spherical law of cosines.
    pub fn distance(&self, other: &Self) -> f64 {
        if self.latitude == other.latitude && self.longitude == other.longitude {
            return 0_f64;
        }

        let self_latitude = self.latitude.to_radians();
        let other_latitude = other.latitude.to_radians();
        let delta_longitude = (self.longitude - other.longitude).to_radians();

        let central_angle_cosine = self_latitude.sin() * other_latitude.sin()
            + self_latitude.cos() * other_latitude.cos() * delta_longitude.cos();
        // acos is undefined outside [-1, 1], rounding can overshoot either end
        let central_angle = central_angle_cosine.clamp(-1_f64, 1_f64).acos();

        central_angle.to_degrees() * MILES_PER_DEGREE * KILOMETERS_PER_MILE
    }
}
