//! Radar composite classifier.
//!
//! Wraps a [`GeoProjector`] and, on every load, turns the raster into an
//! [`IntensityMap`] while sanitizing it: pixels outside the region of
//! interest or without a palette match become transparent black, so the
//! serialized raster only shows readings.

use std::time::Instant;

use projection::{CrsTransform, GeoProjector, SphericalMercator};
use radar_common::{
    DegreePoint, MeterPoint, Pixel, PixelBounds, PixelPoint, RadarError, RadarResult,
};
use raster::RasterImage;
use rayon::prelude::*;
use tracing::debug;

use crate::config::ClassifierConfig;
use crate::intensity::IntensityMap;
use crate::palette::{Palette, PaletteEntry};

/// Classifies radar composite pixels into palette intensities.
#[derive(Debug, Clone)]
pub struct RadarClassifier<T = SphericalMercator> {
    projector: GeoProjector<T>,
    palette: Palette,
    interest: PixelBounds,
    intensity: Option<IntensityMap>,
}

impl RadarClassifier<SphericalMercator> {
    /// Classifier for the ARSO national composite.
    pub fn arso() -> RadarResult<Self> {
        Self::from_config(&ClassifierConfig::arso())
    }

    pub fn from_config(config: &ClassifierConfig) -> RadarResult<Self> {
        let projector = GeoProjector::new(
            &config.degree_crs,
            &config.meter_crs,
            config.bounds.sw(),
            config.bounds.ne(),
        )?;
        Ok(Self::with_projector(
            projector,
            config.palette.clone(),
            config.interest,
        ))
    }
}

impl<T: CrsTransform> RadarClassifier<T> {
    /// Build a classifier around an unloaded projector.
    pub fn with_projector(
        projector: GeoProjector<T>,
        palette: Palette,
        interest: PixelBounds,
    ) -> Self {
        Self {
            projector,
            palette,
            interest,
            intensity: None,
        }
    }

    /// Decode PNG bytes, classify and sanitize them, and replace the current
    /// raster and intensity map.
    ///
    /// On error the previous state is left untouched.
    pub fn load_raster(&mut self, bytes: &[u8]) -> RadarResult<()> {
        let mut raster = RasterImage::decode_png(bytes)?;

        let started = Instant::now();
        let map = classify_and_sanitize(&mut raster, &self.palette, self.interest);
        debug!(
            width = map.width(),
            height = map.height(),
            readings = map.summary().readings(),
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Classified radar raster"
        );

        self.projector.replace_raster(raster);
        self.intensity = Some(map);
        Ok(())
    }

    /// Inclusive test against the region of interest.
    pub fn is_in_interest_bounds(&self, p: PixelPoint) -> bool {
        self.interest.contains(p)
    }

    /// Classify the current raster pixel at `p`.
    ///
    /// After a load the raster is sanitized, so this agrees with
    /// [`intensity`](Self::intensity) for every pixel.
    pub fn classify_pixel(&self, p: PixelPoint) -> RadarResult<PaletteEntry> {
        let pixel = self.projector.pixel(p)?;
        Ok(self.palette.classify(pixel))
    }

    /// Precomputed intensity for the pixel containing `p`.
    pub fn intensity(&self, p: PixelPoint) -> RadarResult<PaletteEntry> {
        self.intensity_map()?.at(p)
    }

    /// Intensity at a point given in degree units.
    pub fn intensity_at_degrees(&self, p: DegreePoint) -> RadarResult<PaletteEntry> {
        let map = self
            .intensity
            .as_ref()
            .ok_or(RadarError::not_loaded("intensity_at_degrees"))?;
        let pixel = self.projector.degrees_to_pixel(p)?;
        map.at(pixel)
    }

    pub fn intensity_map(&self) -> RadarResult<&IntensityMap> {
        self.intensity
            .as_ref()
            .ok_or(RadarError::not_loaded("intensity"))
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn interest_bounds(&self) -> PixelBounds {
        self.interest
    }

    pub fn projector(&self) -> &GeoProjector<T> {
        &self.projector
    }

    pub fn width(&self) -> RadarResult<u32> {
        self.projector.width()
    }

    pub fn height(&self) -> RadarResult<u32> {
        self.projector.height()
    }

    pub fn pixel(&self, p: PixelPoint) -> RadarResult<Pixel> {
        self.projector.pixel(p)
    }

    pub fn pixel_to_meters(&self, p: PixelPoint) -> RadarResult<MeterPoint> {
        self.projector.pixel_to_meters(p)
    }

    pub fn pixel_to_degrees(&self, p: PixelPoint) -> RadarResult<DegreePoint> {
        self.projector.pixel_to_degrees(p)
    }

    pub fn meters_to_pixel(&self, p: MeterPoint) -> RadarResult<PixelPoint> {
        self.projector.meters_to_pixel(p)
    }

    pub fn degrees_to_pixel(&self, p: DegreePoint) -> RadarResult<PixelPoint> {
        self.projector.degrees_to_pixel(p)
    }

    /// PNG bytes of the sanitized raster.
    pub fn serialize_raster(&self) -> RadarResult<Vec<u8>> {
        self.projector.serialize_raster()
    }
}

/// Single pass over the raster, one scanline per task.
///
/// A pixel keeps its color and palette entry only when it lies inside
/// `interest` and classifies to a reading; otherwise its map entry is the
/// sentinel and all four channels are zeroed.
fn classify_and_sanitize(
    raster: &mut RasterImage,
    palette: &Palette,
    interest: PixelBounds,
) -> IntensityMap {
    let width = raster.width();
    let height = raster.height();
    let mut entries = vec![PaletteEntry::NO_READING; width as usize * height as usize];

    if width > 0 {
        raster
            .as_rgba_mut()
            .par_chunks_mut(width as usize * 4)
            .zip(entries.par_chunks_mut(width as usize))
            .enumerate()
            .for_each(|(y, (row, out))| {
                let y = y as u32;
                if !interest.contains_row(y) {
                    row.fill(0);
                    return;
                }
                for (x, (px, slot)) in row.chunks_exact_mut(4).zip(out.iter_mut()).enumerate() {
                    let entry = palette.classify(Pixel::from_rgba(px));
                    if entry.is_reading() && interest.contains_index(x as u32, y) {
                        *slot = entry;
                    } else {
                        px.fill(0);
                    }
                }
            });
    }

    IntensityMap::new(width, height, entries)
}
