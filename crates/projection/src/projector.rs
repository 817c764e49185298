//! Raster-to-geography projection.
//!
//! A [`GeoProjector`] ties a raster to a geographic extent. Pixel (0,0) is
//! the top-left (north-west) corner. Pixel and meter coordinates are related
//! by a linear mapping over the meter-space bounding box, which assumes the
//! raster was rendered on a grid that is regular in the meter-role CRS.
//! Degree coordinates go through the CRS transform.

use radar_common::{
    CrsCode, DegreePoint, GeoBounds, MeterPoint, Pixel, PixelPoint, RadarError, RadarResult,
};
use raster::RasterImage;
use tracing::debug;

use crate::transform::{CrsTransform, SphericalMercator};

/// Box fractions this close outside `[0, 1]` are transform round-off and
/// are clamped onto the edge.
const EDGE_TOLERANCE: f64 = 1e-9;

/// Pixel positions this close to a whole pixel are snapped to it before
/// flooring.
const PIXEL_TOLERANCE: f64 = 1e-6;

/// Pixel ↔ meters ↔ degrees conversions over a loaded raster.
#[derive(Debug, Clone)]
pub struct GeoProjector<T = SphericalMercator> {
    transform: T,
    degree_crs: CrsCode,
    meter_crs: CrsCode,
    degree_sw: DegreePoint,
    degree_ne: DegreePoint,
    meter_sw: MeterPoint,
    meter_ne: MeterPoint,
    raster: Option<RasterImage>,
}

impl GeoProjector<SphericalMercator> {
    /// Create a projector using the built-in spherical Mercator transform.
    ///
    /// # Arguments
    /// * `degree_crs` - Identifier of the CRS playing the degree role
    /// * `meter_crs` - Identifier of the CRS playing the meter role
    /// * `sw`, `ne` - Raster corners in degree units
    pub fn new(
        degree_crs: &str,
        meter_crs: &str,
        sw: DegreePoint,
        ne: DegreePoint,
    ) -> RadarResult<Self> {
        Self::with_transform(SphericalMercator, degree_crs, meter_crs, sw, ne)
    }
}

impl<T: CrsTransform> GeoProjector<T> {
    /// Create a projector with a custom transform.
    ///
    /// The meter-space corners are derived here, once.
    pub fn with_transform(
        transform: T,
        degree_crs: &str,
        meter_crs: &str,
        sw: DegreePoint,
        ne: DegreePoint,
    ) -> RadarResult<Self> {
        let degree_crs = CrsCode::parse(degree_crs)?;
        let meter_crs = CrsCode::parse(meter_crs)?;

        let to_meters = |p: DegreePoint| -> RadarResult<MeterPoint> {
            transform
                .transform(degree_crs, meter_crs, p.x, p.y)
                .map(MeterPoint::from)
        };
        let meter_sw = to_meters(sw)?;
        let meter_ne = to_meters(ne)?;

        Ok(Self {
            transform,
            degree_crs,
            meter_crs,
            degree_sw: sw,
            degree_ne: ne,
            meter_sw,
            meter_ne,
            raster: None,
        })
    }

    /// Decode PNG bytes and replace the current raster.
    pub fn load_raster(&mut self, bytes: &[u8]) -> RadarResult<()> {
        let raster = RasterImage::decode_png(bytes)?;
        self.replace_raster(raster);
        Ok(())
    }

    /// Replace the current raster with an already decoded one.
    pub fn replace_raster(&mut self, raster: RasterImage) {
        debug!(
            width = raster.width(),
            height = raster.height(),
            "Raster loaded"
        );
        self.raster = Some(raster);
    }

    pub fn is_loaded(&self) -> bool {
        self.raster.is_some()
    }

    /// The loaded raster.
    pub fn raster(&self) -> RadarResult<&RasterImage> {
        self.raster_for("raster")
    }

    fn raster_for(&self, operation: &'static str) -> RadarResult<&RasterImage> {
        self.raster
            .as_ref()
            .ok_or(RadarError::not_loaded(operation))
    }

    pub fn width(&self) -> RadarResult<u32> {
        Ok(self.raster_for("width")?.width())
    }

    pub fn height(&self) -> RadarResult<u32> {
        Ok(self.raster_for("height")?.height())
    }

    /// Checked read of the pixel containing `p`.
    pub fn pixel(&self, p: PixelPoint) -> RadarResult<Pixel> {
        self.raster_for("pixel")?.pixel(p)
    }

    /// Encode the current raster as PNG bytes.
    pub fn serialize_raster(&self) -> RadarResult<Vec<u8>> {
        self.raster_for("serialize_raster")?.encode_png()
    }

    pub fn degree_crs(&self) -> CrsCode {
        self.degree_crs
    }

    pub fn meter_crs(&self) -> CrsCode {
        self.meter_crs
    }

    /// Raster extent in degree units, as supplied at construction.
    pub fn degree_bounds(&self) -> GeoBounds {
        GeoBounds::from_corners(self.degree_sw, self.degree_ne)
    }

    /// Raster extent in meter units: (south-west, north-east).
    pub fn meter_bounds(&self) -> (MeterPoint, MeterPoint) {
        (self.meter_sw, self.meter_ne)
    }

    /// Pixel to meters by linear interpolation; row 0 is north.
    pub fn pixel_to_meters(&self, p: PixelPoint) -> RadarResult<MeterPoint> {
        let raster = self.raster_for("pixel_to_meters")?;
        let (sw, ne) = (self.meter_sw, self.meter_ne);

        let x = sw.x + (ne.x - sw.x) * p.x / raster.width() as f64;
        let y = ne.y + (sw.y - ne.y) * p.y / raster.height() as f64;
        Ok(MeterPoint::new(x, y))
    }

    pub fn pixel_to_degrees(&self, p: PixelPoint) -> RadarResult<DegreePoint> {
        let meters = self.pixel_to_meters(p)?;
        self.meters_to_degrees(meters)
    }

    /// Meters to the pixel containing them.
    ///
    /// Fails with `OutOfBounds` when the point lies outside the meter
    /// bounding box. The far edge maps onto the last row/column.
    pub fn meters_to_pixel(&self, p: MeterPoint) -> RadarResult<PixelPoint> {
        let raster = self.raster_for("meters_to_pixel")?;
        let (sw, ne) = (self.meter_sw, self.meter_ne);

        let rx = snap_to_unit((p.x - sw.x) / (ne.x - sw.x));
        let ry = snap_to_unit((p.y - ne.y) / (sw.y - ne.y));

        if !(0.0..=1.0).contains(&rx) || !(0.0..=1.0).contains(&ry) {
            return Err(RadarError::OutOfBounds {
                operation: "meters_to_pixel",
                x: p.x,
                y: p.y,
                rx,
                ry,
            });
        }

        let width = raster.width() as f64;
        let height = raster.height() as f64;
        let px = snapped_floor(rx * width).min(width - 1.0);
        let py = snapped_floor(ry * height).min(height - 1.0);
        Ok(PixelPoint::new(px, py))
    }

    pub fn degrees_to_pixel(&self, p: DegreePoint) -> RadarResult<PixelPoint> {
        let meters = self.degrees_to_meters(p)?;
        self.meters_to_pixel(meters)
    }

    pub fn degrees_to_meters(&self, p: DegreePoint) -> RadarResult<MeterPoint> {
        self.transform
            .transform(self.degree_crs, self.meter_crs, p.x, p.y)
            .map(MeterPoint::from)
    }

    pub fn meters_to_degrees(&self, p: MeterPoint) -> RadarResult<DegreePoint> {
        self.transform
            .transform(self.meter_crs, self.degree_crs, p.x, p.y)
            .map(DegreePoint::from)
    }
}

fn snap_to_unit(r: f64) -> f64 {
    if (-EDGE_TOLERANCE..0.0).contains(&r) {
        0.0
    } else if r > 1.0 && r <= 1.0 + EDGE_TOLERANCE {
        1.0
    } else {
        r
    }
}

fn snapped_floor(v: f64) -> f64 {
    let nearest = v.round();
    if (v - nearest).abs() < PIXEL_TOLERANCE {
        nearest
    } else {
        v.floor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{arso, assert_approx_eq, assert_coords_approx_eq, RasterBuilder};

    /// Identity transform so meter and degree spaces coincide.
    struct Identity;

    impl CrsTransform for Identity {
        fn transform(&self, _: CrsCode, _: CrsCode, x: f64, y: f64) -> RadarResult<(f64, f64)> {
            Ok((x, y))
        }
    }

    fn linear_projector(width: u32, height: u32) -> GeoProjector<Identity> {
        let mut projector = GeoProjector::with_transform(
            Identity,
            "EPSG:4326",
            "EPSG:4326",
            DegreePoint::new(0.0, 0.0),
            DegreePoint::new(100.0, 50.0),
        )
        .unwrap();
        projector
            .load_raster(&RasterBuilder::new(width, height).to_png())
            .unwrap();
        projector
    }

    #[test]
    fn test_not_loaded() {
        let projector = GeoProjector::new(
            arso::DEGREE_CRS,
            arso::METER_CRS,
            arso::SW.into(),
            arso::NE.into(),
        )
        .unwrap();
        assert!(!projector.is_loaded());
        assert!(matches!(
            projector.width(),
            Err(RadarError::NotLoaded { operation: "width" })
        ));
        assert!(matches!(
            projector.pixel_to_meters(PixelPoint::at(0, 0)),
            Err(RadarError::NotLoaded { .. })
        ));
        assert!(matches!(
            projector.serialize_raster(),
            Err(RadarError::NotLoaded { operation: "serialize_raster" })
        ));
    }

    #[test]
    fn test_invalid_crs() {
        let result = GeoProjector::new(
            "EPSG:1",
            arso::METER_CRS,
            arso::SW.into(),
            arso::NE.into(),
        );
        assert!(matches!(result, Err(RadarError::InvalidCrs(_))));
    }

    #[test]
    fn test_pixel_to_meters_corners() {
        let projector = linear_projector(10, 5);
        assert_eq!(
            projector.pixel_to_meters(PixelPoint::at(0, 0)).unwrap(),
            MeterPoint::new(0.0, 50.0)
        );
        assert_eq!(
            projector.pixel_to_meters(PixelPoint::at(10, 5)).unwrap(),
            MeterPoint::new(100.0, 0.0)
        );
        let mid = projector.pixel_to_meters(PixelPoint::at(5, 1)).unwrap();
        assert_coords_approx_eq!((mid.x, mid.y), (50.0, 40.0), 1e-9);
    }

    #[test]
    fn test_meters_to_pixel_far_edge_clamped() {
        let projector = linear_projector(10, 5);
        assert_eq!(
            projector.meters_to_pixel(MeterPoint::new(100.0, 0.0)).unwrap(),
            PixelPoint::at(9, 4)
        );
        assert_eq!(
            projector.meters_to_pixel(MeterPoint::new(0.0, 50.0)).unwrap(),
            PixelPoint::at(0, 0)
        );
    }

    #[test]
    fn test_meters_to_pixel_out_of_bounds() {
        let projector = linear_projector(10, 5);
        for p in [
            MeterPoint::new(-0.001, 25.0),
            MeterPoint::new(100.001, 25.0),
            MeterPoint::new(50.0, 50.5),
            MeterPoint::new(50.0, -1.0),
            MeterPoint::new(f64::NAN, 25.0),
        ] {
            assert!(matches!(
                projector.meters_to_pixel(p),
                Err(RadarError::OutOfBounds { operation: "meters_to_pixel", .. })
            ));
        }
    }

    #[test]
    fn test_meters_to_pixel_absorbs_edge_round_off() {
        let projector = linear_projector(10, 5);
        // 1e-8 m outside a 100 m wide box is a fraction of 1e-10
        assert_eq!(
            projector.meters_to_pixel(MeterPoint::new(-1e-8, 50.0 + 1e-8)).unwrap(),
            PixelPoint::at(0, 0)
        );
        assert_eq!(
            projector.meters_to_pixel(MeterPoint::new(100.0 + 1e-8, -1e-8)).unwrap(),
            PixelPoint::at(9, 4)
        );
        // Just short of a pixel boundary lands on it
        assert_eq!(
            projector.meters_to_pixel(MeterPoint::new(30.0 - 1e-9, 40.0 + 1e-9)).unwrap(),
            PixelPoint::at(3, 1)
        );
        assert!(matches!(
            projector.meters_to_pixel(MeterPoint::new(-1e-3, 25.0)),
            Err(RadarError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_bounds_fixed_at_construction() {
        let mut projector = linear_projector(10, 5);
        let before = projector.meter_bounds();
        projector
            .load_raster(&RasterBuilder::new(3, 3).to_png())
            .unwrap();
        assert_eq!(projector.meter_bounds(), before);
        assert_eq!(projector.degree_bounds(), GeoBounds::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(projector.width().unwrap(), 3);
    }

    #[test]
    fn test_load_replaces_raster() {
        let mut projector = linear_projector(2, 2);
        projector
            .load_raster(&RasterBuilder::new(4, 1).fill([1, 2, 3, 255]).to_png())
            .unwrap();
        assert_eq!(projector.width().unwrap(), 4);
        assert_eq!(projector.height().unwrap(), 1);
        assert_eq!(
            projector.pixel(PixelPoint::at(3, 0)).unwrap(),
            Pixel::new(1, 2, 3, 255)
        );
    }

    #[test]
    fn test_degree_conversion_uses_transform() {
        let projector = linear_projector(10, 10);
        let d = projector.pixel_to_degrees(PixelPoint::at(5, 5)).unwrap();
        assert_approx_eq!(d.x, 50.0, 1e-9);
        assert_approx_eq!(d.y, 25.0, 1e-9);
        assert_eq!(
            projector.degrees_to_pixel(DegreePoint::new(50.0, 25.0)).unwrap(),
            PixelPoint::at(5, 5)
        );
    }
}
