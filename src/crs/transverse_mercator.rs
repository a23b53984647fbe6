//! Transverse Mercator on the WGS84 ellipsoid (UTM).
//!
//! Uses the Krüger series to sixth order in the third flattening `n`, following
//! Karney, "Transverse Mercator with an accuracy of a few nanometers" (2011).
//! Within a UTM zone the forward/inverse pair is consistent to well below a
//! millimetre.

use lazy_static::lazy_static;

/// WGS84 semi-major axis (m).
pub const WGS84_A: f64 = 6_378_137.0;

/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;

/// UTM scale factor on the central meridian.
pub const UTM_K0: f64 = 0.9996;

/// UTM false easting (m).
pub const UTM_FALSE_EASTING: f64 = 500_000.0;

/// UTM false northing for the southern hemisphere (m).
pub const UTM_FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

const NEWTON_MAX_ITER: usize = 10;
const NEWTON_TOL: f64 = 1e-14;

/// Series coefficients for one ellipsoid.
#[derive(Debug, Clone)]
struct KruegerSeries {
    /// First eccentricity
    e: f64,
    /// Rectifying radius
    big_a: f64,
    alpha: [f64; 6],
    beta: [f64; 6],
}

impl KruegerSeries {
    fn new(a: f64, f: f64) -> Self {
        let n = f / (2.0 - f);
        let n2 = n * n;
        let n3 = n2 * n;
        let n4 = n3 * n;
        let n5 = n4 * n;
        let n6 = n5 * n;

        let big_a = a / (1.0 + n) * (1.0 + n2 / 4.0 + n4 / 64.0 + n6 / 256.0);

        let alpha = [
            n / 2.0 - 2.0 * n2 / 3.0 + 5.0 * n3 / 16.0 + 41.0 * n4 / 180.0 - 127.0 * n5 / 288.0
                + 7891.0 * n6 / 37800.0,
            13.0 * n2 / 48.0 - 3.0 * n3 / 5.0 + 557.0 * n4 / 1440.0 + 281.0 * n5 / 630.0
                - 1983433.0 * n6 / 1935360.0,
            61.0 * n3 / 240.0 - 103.0 * n4 / 140.0 + 15061.0 * n5 / 26880.0
                + 167603.0 * n6 / 181440.0,
            49561.0 * n4 / 161280.0 - 179.0 * n5 / 168.0 + 6601661.0 * n6 / 7257600.0,
            34729.0 * n5 / 80640.0 - 3418889.0 * n6 / 1995840.0,
            212378941.0 * n6 / 319334400.0,
        ];

        let beta = [
            n / 2.0 - 2.0 * n2 / 3.0 + 37.0 * n3 / 96.0 - n4 / 360.0 - 81.0 * n5 / 512.0
                + 96199.0 * n6 / 604800.0,
            n2 / 48.0 + n3 / 15.0 - 437.0 * n4 / 1440.0 + 46.0 * n5 / 105.0
                - 1118711.0 * n6 / 3870720.0,
            17.0 * n3 / 480.0 - 37.0 * n4 / 840.0 - 209.0 * n5 / 4480.0 + 5569.0 * n6 / 90720.0,
            4397.0 * n4 / 161280.0 - 11.0 * n5 / 504.0 - 830251.0 * n6 / 7257600.0,
            4583.0 * n5 / 161280.0 - 108847.0 * n6 / 3991680.0,
            20648693.0 * n6 / 638668800.0,
        ];

        Self {
            e: (f * (2.0 - f)).sqrt(),
            big_a,
            alpha,
            beta,
        }
    }

    /// Conformal latitude tangent τ' from geodetic latitude tangent τ.
    fn tau_prime(&self, tau: f64) -> f64 {
        let e = self.e;
        let sigma = (e * (e * tau / (1.0 + tau * tau).sqrt()).atanh()).sinh();
        tau * (1.0 + sigma * sigma).sqrt() - sigma * (1.0 + tau * tau).sqrt()
    }

    /// Invert [`Self::tau_prime`] with Newton's method.
    fn tau_from_prime(&self, tau_p: f64) -> f64 {
        let e2 = self.e * self.e;
        let mut tau = tau_p;
        for _ in 0..NEWTON_MAX_ITER {
            let tau_i = self.tau_prime(tau);
            let delta = (tau_p - tau_i) / (1.0 + tau_i * tau_i).sqrt() * (1.0 + (1.0 - e2) * tau * tau)
                / ((1.0 - e2) * (1.0 + tau * tau).sqrt());
            tau += delta;
            if delta.abs() <= NEWTON_TOL * tau.abs().max(1.0) {
                break;
            }
        }
        tau
    }
}

lazy_static! {
    static ref WGS84: KruegerSeries = KruegerSeries::new(WGS84_A, WGS84_F);
}

/// A Transverse Mercator projection with fixed origin and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransverseMercator {
    /// Central meridian (degrees)
    pub lon0: f64,
    /// Scale factor on the central meridian
    pub k0: f64,
    /// False easting (m)
    pub false_easting: f64,
    /// False northing (m)
    pub false_northing: f64,
}

impl TransverseMercator {
    /// UTM projection for a zone (1-60) and hemisphere. The zone is not validated here.
    pub fn utm(zone: u8, south: bool) -> Self {
        Self {
            lon0: central_meridian(zone),
            k0: UTM_K0,
            false_easting: UTM_FALSE_EASTING,
            false_northing: if south { UTM_FALSE_NORTHING_SOUTH } else { 0.0 },
        }
    }

    /// Project `(lon, lat)` in degrees to `(easting, northing)` in metres.
    pub fn forward(&self, lon: f64, lat: f64) -> (f64, f64) {
        let s = &*WGS84;
        let lambda = (lon - self.lon0).to_radians();
        let tau = lat.to_radians().tan();
        let tau_p = s.tau_prime(tau);

        let xi_p = tau_p.atan2(lambda.cos());
        let eta_p = (lambda.sin() / (tau_p * tau_p + lambda.cos().powi(2)).sqrt()).asinh();

        let mut xi = xi_p;
        let mut eta = eta_p;
        for (j, a) in s.alpha.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi += a * (k * xi_p).sin() * (k * eta_p).cosh();
            eta += a * (k * xi_p).cos() * (k * eta_p).sinh();
        }

        let x = self.k0 * s.big_a * eta + self.false_easting;
        let y = self.k0 * s.big_a * xi + self.false_northing;
        (x, y)
    }

    /// Unproject `(easting, northing)` in metres to `(lon, lat)` in degrees.
    pub fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let s = &*WGS84;
        let xi = (y - self.false_northing) / (self.k0 * s.big_a);
        let eta = (x - self.false_easting) / (self.k0 * s.big_a);

        let mut xi_p = xi;
        let mut eta_p = eta;
        for (j, b) in s.beta.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi_p -= b * (k * xi).sin() * (k * eta).cosh();
            eta_p -= b * (k * xi).cos() * (k * eta).sinh();
        }

        let sinh_eta = eta_p.sinh();
        let cos_xi = xi_p.cos();
        let tau_p = xi_p.sin() / (sinh_eta * sinh_eta + cos_xi * cos_xi).sqrt();
        let lambda = sinh_eta.atan2(cos_xi);

        let lat = s.tau_from_prime(tau_p).atan().to_degrees();
        let lon = self.lon0 + lambda.to_degrees();
        (lon, lat)
    }
}

/// Central meridian of a UTM zone in degrees.
pub fn central_meridian(zone: u8) -> f64 {
    f64::from(zone) * 6.0 - 183.0
}

/// UTM zone containing a longitude (standard 6° grid, no Norway/Svalbard exceptions).
pub fn zone_for_longitude(lon: f64) -> u8 {
    let normalized = (lon + 180.0).rem_euclid(360.0);
    ((normalized / 6.0).floor() as u8 % 60) + 1
}
