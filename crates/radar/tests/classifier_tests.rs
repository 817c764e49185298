//! End-to-end classifier tests on synthetic composites.

use radar::{ClassifierConfig, PaletteEntry, RadarClassifier, ARSO_ENTRIES};
use radar_common::{DegreePoint, Pixel, PixelBounds, PixelPoint, RadarError};
use test_utils::{arso, corrupt_chunk_crc, palette::COLORS, radar_stripes, RasterBuilder};

fn classifier_with_interest(interest: PixelBounds) -> RadarClassifier {
    let mut config = ClassifierConfig::arso();
    config.interest = interest;
    RadarClassifier::from_config(&config).unwrap()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_two_by_two_scenario() {
    // Only row 0 is of interest
    let mut classifier = classifier_with_interest(PixelBounds::new(0, 0, 1, 0));
    let png = RasterBuilder::new(2, 2)
        .set(0, 0, [211, 0, 0, 255])
        .set(1, 0, [0, 0, 0, 0])
        .set(0, 1, [8, 70, 254, 255])
        .set(1, 1, [211, 0, 0, 120])
        .to_png();

    classifier.load_raster(&png).unwrap();

    let strong = classifier.intensity(PixelPoint::at(0, 0)).unwrap();
    assert_eq!(strong, PaletteEntry::new([211, 0, 0], 51, 4));

    // Low alpha never classifies, whatever the color
    assert_eq!(
        classifier.palette().classify(Pixel::new(211, 0, 0, 120)),
        PaletteEntry::NO_READING
    );
    assert_eq!(
        classifier.intensity(PixelPoint::at(1, 1)).unwrap(),
        PaletteEntry::NO_READING
    );

    // Palette color outside the region of interest is masked and zeroed
    assert!(!classifier.is_in_interest_bounds(PixelPoint::at(0, 1)));
    assert_eq!(
        classifier.intensity(PixelPoint::at(0, 1)).unwrap(),
        PaletteEntry::NO_READING
    );
    assert_eq!(classifier.pixel(PixelPoint::at(0, 1)).unwrap(), Pixel::CLEAR);
    assert_eq!(classifier.pixel(PixelPoint::at(1, 1)).unwrap(), Pixel::CLEAR);

    // Kept pixels are untouched
    assert_eq!(
        classifier.pixel(PixelPoint::at(0, 0)).unwrap(),
        Pixel::new(211, 0, 0, 255)
    );
}

#[test]
fn test_unknown_color_inside_interest_is_zeroed() {
    let mut classifier = classifier_with_interest(PixelBounds::new(0, 0, 0, 0));
    let png = RasterBuilder::new(1, 1).fill([200, 200, 200, 255]).to_png();
    classifier.load_raster(&png).unwrap();

    assert_eq!(
        classifier.intensity(PixelPoint::at(0, 0)).unwrap(),
        PaletteEntry::NO_READING
    );
    assert_eq!(classifier.pixel(PixelPoint::at(0, 0)).unwrap(), Pixel::CLEAR);
}

#[test]
fn test_every_palette_color_classifies() {
    let mut classifier = classifier_with_interest(PixelBounds::full(15, 1));
    let mut builder = RasterBuilder::new(15, 1);
    for (x, (r, g, b, _, _)) in COLORS.iter().enumerate() {
        builder = builder.set(x as u32, 0, [*r, *g, *b, 255]);
    }
    classifier.load_raster(&builder.to_png()).unwrap();

    for (x, expected) in ARSO_ENTRIES.iter().enumerate() {
        let got = classifier.intensity(PixelPoint::at(x as u32, 0)).unwrap();
        assert_eq!(got, *expected);
        assert_eq!(
            classifier.classify_pixel(PixelPoint::at(x as u32, 0)).unwrap(),
            *expected
        );
    }
}

// ============================================================================
// Full-size composite
// ============================================================================

#[test]
fn test_arso_sized_stripes() {
    let mut classifier = RadarClassifier::arso().unwrap();
    let png = radar_stripes(arso::WIDTH, arso::HEIGHT).to_png();
    classifier.load_raster(&png).unwrap();

    let map = classifier.intensity_map().unwrap();
    assert_eq!(map.width(), arso::WIDTH);
    assert_eq!(map.height(), arso::HEIGHT);
    assert_eq!(
        map.entries().len(),
        (arso::WIDTH * arso::HEIGHT) as usize
    );

    let (x1, y1, x2, y2) = arso::INTEREST;
    for y in 0..arso::HEIGHT {
        for x in 0..arso::WIDTH {
            let entry = map.get(x, y).unwrap();
            let inside = x1 <= x && x <= x2 && y1 <= y && y <= y2;
            let opaque = y % 3 != 2;
            if inside && opaque {
                assert_eq!(entry, ARSO_ENTRIES[x as usize % 15], "({x}, {y})");
            } else {
                assert_eq!(entry, PaletteEntry::NO_READING, "({x}, {y})");
                assert_eq!(
                    classifier.pixel(PixelPoint::at(x, y)).unwrap(),
                    Pixel::CLEAR
                );
            }
        }
    }
}

#[test]
fn test_classify_pixel_agrees_with_map_after_load() {
    let mut classifier = RadarClassifier::arso().unwrap();
    classifier
        .load_raster(&radar_stripes(arso::WIDTH, arso::HEIGHT).to_png())
        .unwrap();

    for (x, y) in [(0, 0), (25, 12), (26, 14), (400, 300), (774, 585), (799, 599)] {
        let p = PixelPoint::at(x, y);
        assert_eq!(
            classifier.classify_pixel(p).unwrap(),
            classifier.intensity(p).unwrap()
        );
    }
}

#[test]
fn test_load_is_idempotent() {
    let png = radar_stripes(120, 90).to_png();
    let interest = PixelBounds::new(10, 5, 100, 80);

    let mut a = classifier_with_interest(interest);
    a.load_raster(&png).unwrap();
    let mut b = classifier_with_interest(interest);
    b.load_raster(&png).unwrap();
    b.load_raster(&png).unwrap();

    assert_eq!(a.intensity_map().unwrap(), b.intensity_map().unwrap());
    assert_eq!(a.serialize_raster().unwrap(), b.serialize_raster().unwrap());
    assert_eq!(
        a.projector().raster().unwrap(),
        b.projector().raster().unwrap()
    );
}

#[test]
fn test_load_accepts_bad_chunk_crc() {
    let mut classifier = classifier_with_interest(PixelBounds::full(3, 3));
    let mut png = RasterBuilder::new(3, 3).fill([181, 3, 3, 255]).to_png();
    corrupt_chunk_crc(&mut png, b"IDAT");

    classifier.load_raster(&png).unwrap();
    assert_eq!(classifier.intensity(PixelPoint::at(2, 2)).unwrap().value, 54);
    assert_eq!(classifier.intensity_map().unwrap().summary().readings(), 9);
}

#[test]
fn test_reload_replaces_map() {
    let mut classifier = classifier_with_interest(PixelBounds::full(4, 4));
    classifier
        .load_raster(&RasterBuilder::new(4, 4).fill([211, 0, 0, 255]).to_png())
        .unwrap();
    assert_eq!(classifier.intensity_map().unwrap().summary().readings(), 16);

    classifier
        .load_raster(&RasterBuilder::new(2, 3).fill([8, 70, 254, 255]).to_png())
        .unwrap();
    let map = classifier.intensity_map().unwrap();
    assert_eq!((map.width(), map.height()), (2, 3));
    assert_eq!(map.summary().groups, [6, 0, 0, 0]);
    assert!(matches!(
        classifier.intensity(PixelPoint::at(3, 3)),
        Err(RadarError::IndexOutOfRange { .. })
    ));
}

#[test]
fn test_sanitized_raster_roundtrips_through_png() {
    let png = radar_stripes(64, 48).to_png();
    let interest = PixelBounds::new(4, 4, 59, 43);

    let mut first = classifier_with_interest(interest);
    first.load_raster(&png).unwrap();
    let sanitized = first.serialize_raster().unwrap();

    let mut second = classifier_with_interest(interest);
    second.load_raster(&sanitized).unwrap();

    assert_eq!(first.intensity_map().unwrap(), second.intensity_map().unwrap());
    assert_eq!(
        first.projector().raster().unwrap(),
        second.projector().raster().unwrap()
    );
}

// ============================================================================
// Geographic queries
// ============================================================================

#[test]
fn test_intensity_at_degrees() {
    let mut classifier = RadarClassifier::arso().unwrap();
    classifier
        .load_raster(
            &RasterBuilder::new(arso::WIDTH, arso::HEIGHT)
                .fill([0, 120, 254, 255])
                .to_png(),
        )
        .unwrap();

    let center = classifier.pixel_to_degrees(PixelPoint::at(400, 300)).unwrap();
    let entry = classifier.intensity_at_degrees(center).unwrap();
    assert_eq!(entry.value, 18);
    assert_eq!(entry.group, 1);

    // North-west corner pixel is outside the region of interest
    let corner = DegreePoint::new(arso::SW.0, arso::NE.1);
    assert_eq!(
        classifier.intensity_at_degrees(corner).unwrap(),
        PaletteEntry::NO_READING
    );

    assert!(matches!(
        classifier.intensity_at_degrees(DegreePoint::new(10.0, 10.0)),
        Err(RadarError::OutOfBounds { .. })
    ));
}

#[test]
fn test_config_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("arso.yaml");
    let yaml = serde_yaml::to_string(&ClassifierConfig::arso()).unwrap();
    std::fs::write(&path, yaml).unwrap();

    let config = ClassifierConfig::load(&path).unwrap();
    assert_eq!(config, ClassifierConfig::arso());
    assert!(RadarClassifier::from_config(&config).is_ok());
}
