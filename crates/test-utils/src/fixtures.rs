//! Common test fixtures for radar composite tests.

/// Geometry of the ARSO national radar composite.
pub mod arso {
    /// Degree-role CRS identifier used by the composite
    pub const DEGREE_CRS: &str = "EPSG:900913";

    /// Meter-role CRS identifier used by the composite
    pub const METER_CRS: &str = "EPSG:4326";

    /// South-west corner in degree units
    pub const SW: (f64, f64) = (44.657, 12.10);

    /// North-east corner in degree units
    pub const NE: (f64, f64) = (47.407, 17.44);

    /// Region of interest (x1, y1, x2, y2), inclusive
    pub const INTEREST: (u32, u32, u32, u32) = (25, 12, 774, 585);

    /// Typical composite raster size
    pub const WIDTH: u32 = 800;
    pub const HEIGHT: u32 = 600;
}

/// Radar intensity palette as (r, g, b, value, group), strongest first.
pub mod palette {
    pub const COLORS: [(u8, u8, u8, u8, u8); 15] = [
        (203, 0, 204, 57, 4),
        (181, 3, 3, 54, 4),
        (211, 0, 0, 51, 4),
        (255, 62, 1, 48, 3),
        (254, 132, 0, 45, 3),
        (254, 198, 0, 42, 3),
        (249, 250, 1, 39, 3),
        (184, 250, 0, 36, 2),
        (108, 249, 0, 33, 2),
        (66, 235, 66, 30, 2),
        (4, 216, 131, 27, 2),
        (0, 220, 254, 24, 1),
        (0, 174, 253, 21, 1),
        (0, 120, 254, 18, 1),
        (8, 70, 254, 15, 1),
    ];
}

/// Sample INCA timeline responses.
pub mod timeline {
    /// Two well-formed entries, oldest first.
    pub const TWO_ENTRIES: &str = r#"[
        {
            "mode": "ANL",
            "period": "",
            "date": "202405101200",
            "hhmm": "1200",
            "bbox": "44.67,12.1,47.42,17.44",
            "width": "800",
            "height": "600",
            "valid": "2024-05-10T12:00:00Z",
            "path": "/uploads/probase/www/nowcast/inca/inca_si0zm_20240510-1200+0000.png"
        },
        {
            "mode": "ANL",
            "period": "",
            "date": "202405101210",
            "hhmm": "1210",
            "bbox": "44.67,12.1,47.42,17.44",
            "width": "800",
            "height": "600",
            "valid": "2024-05-10T12:10:00Z",
            "path": "/uploads/probase/www/nowcast/inca/inca_si0zm_20240510-1210+0000.png"
        }
    ]"#;

    /// One good entry followed by one without an image path.
    pub const ONE_MALFORMED: &str = r#"[
        {
            "mode": "ANL",
            "date": "202405101200",
            "hhmm": "1200",
            "bbox": "44.67,12.1,47.42,17.44",
            "width": "800",
            "height": "600",
            "valid": "2024-05-10T12:00:00Z",
            "path": "/a.png"
        },
        {
            "mode": "ANL",
            "date": "202405101210",
            "hhmm": "1210",
            "width": "800",
            "height": "600",
            "valid": "2024-05-10T12:10:00Z"
        }
    ]"#;

    /// Entries whose informational fields need lenient parsing: a float
    /// width, a valid time without seconds, and a non-numeric width with an
    /// empty valid time and a broken bbox.
    pub const LENIENT_FIELDS: &str = r#"[
        {
            "mode": "ANL",
            "date": "202405101200",
            "hhmm": "1200",
            "width": "800.0",
            "height": "600",
            "valid": "2024-05-10T12:00:00Z",
            "path": "/a.png"
        },
        {
            "mode": "ANL",
            "date": "202405101210",
            "hhmm": "1210",
            "width": "800",
            "height": "600",
            "valid": "2024-05-10 12:10",
            "path": "/b.png"
        },
        {
            "mode": "FCT",
            "date": "202405101220",
            "hhmm": "1220",
            "bbox": "n/a",
            "width": "wide",
            "height": "600",
            "valid": "",
            "path": "/c.png"
        }
    ]"#;
}
