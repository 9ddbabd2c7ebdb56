//! Coordinate extraction from submissions.
//!
//! A submission carries at most one honored input kind, checked in the
//! order manual, batch, gpx. Manual and batch text share the same
//! line-oriented `lat,lon` format; GPX files contribute the track points of
//! the first segment of the first track.

use crate::coordinate::Coordinate;
use crate::platform::Platform;
use crate::result::{GeofixError, GeofixResult};
use std::path::PathBuf;

/// Where GPX content comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GpxSource {
    /// A file on the local filesystem
    Path(PathBuf),
    /// Raw uploaded bytes, expected to be UTF-8 XML
    Bytes(Vec<u8>),
}

/// A decoded simulation request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    /// Platform name as submitted (case-insensitive)
    pub platform: Option<String>,
    /// Manual coordinate text
    pub manual: Option<String>,
    /// Batch coordinate text, one `lat,lon` per line
    pub batch: Option<String>,
    /// GPX track
    pub gpx: Option<GpxSource>,
}

impl Submission {
    /// Create an empty submission
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the platform name
    #[must_use]
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    /// Set manual coordinate text
    #[must_use]
    pub fn with_manual(mut self, text: impl Into<String>) -> Self {
        self.manual = Some(text.into());
        self
    }

    /// Set batch coordinate text
    #[must_use]
    pub fn with_batch(mut self, text: impl Into<String>) -> Self {
        self.batch = Some(text.into());
        self
    }

    /// Set the GPX source
    #[must_use]
    pub fn with_gpx(mut self, source: GpxSource) -> Self {
        self.gpx = Some(source);
        self
    }

    /// Resolved platform; absent means Android
    #[must_use]
    pub fn platform(&self) -> Platform {
        Platform::from_optional(self.platform.as_deref())
    }
}

/// Extract the coordinate sequence from a submission.
///
/// Returns an empty sequence when no input kind is present; callers treat
/// that as fatal.
pub fn extract_coordinates(submission: &Submission) -> GeofixResult<Vec<Coordinate>> {
    if let Some(manual) = &submission.manual {
        return parse_coordinate_lines(manual);
    }
    if let Some(batch) = &submission.batch {
        return parse_coordinate_lines(batch);
    }
    if let Some(gpx) = &submission.gpx {
        let text = read_gpx_source(gpx)?;
        return parse_gpx(&text);
    }
    Ok(Vec::new())
}

/// Parse newline-delimited `lat,lon` text.
///
/// Lines are trimmed and blank lines skipped. Each remaining line is split
/// on its first comma.
pub fn parse_coordinate_lines(text: &str) -> GeofixResult<Vec<Coordinate>> {
    text.lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(line_no, line)| {
            let malformed = || GeofixError::MalformedCoordinate {
                line: line_no,
                content: line.to_string(),
            };
            let (lat, lon) = line.split_once(',').ok_or_else(malformed)?;
            Coordinate::new(lat, lon).map_err(|_| malformed())
        })
        .collect()
}

/// Parse GPX text into the track points of its first track segment.
///
/// Only `lat`/`lon` attributes are read, in document order. Elements are
/// matched by local name so namespaced GPX 1.0/1.1 documents work.
pub fn parse_gpx(text: &str) -> GeofixResult<Vec<Coordinate>> {
    let doc = roxmltree::Document::parse(text).map_err(|e| GeofixError::gpx(e.to_string()))?;

    let root = doc.root_element();
    if root.tag_name().name() != "gpx" {
        return Err(GeofixError::gpx(format!(
            "expected <gpx> root element, found <{}>",
            root.tag_name().name()
        )));
    }

    let track = first_child(root, "trk").ok_or_else(|| GeofixError::gpx("missing <trk> element"))?;
    let segment =
        first_child(track, "trkseg").ok_or_else(|| GeofixError::gpx("missing <trkseg> element"))?;

    let points = segment
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "trkpt")
        .enumerate()
        .map(|(idx, pt)| {
            let lat = pt.attribute("lat");
            let lon = pt.attribute("lon");
            match (lat, lon) {
                (Some(lat), Some(lon)) => Coordinate::new(lat, lon).map_err(|_| {
                    GeofixError::gpx(format!("track point {} has an empty lat/lon", idx + 1))
                }),
                _ => Err(GeofixError::gpx(format!(
                    "track point {} is missing lat/lon attributes",
                    idx + 1
                ))),
            }
        })
        .collect::<GeofixResult<Vec<_>>>()?;

    if points.is_empty() {
        return Err(GeofixError::gpx("track segment has no <trkpt> elements"));
    }
    Ok(points)
}

fn first_child<'a, 'input>(
    node: roxmltree::Node<'a, 'input>,
    name: &str,
) -> Option<roxmltree::Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

fn read_gpx_source(source: &GpxSource) -> GeofixResult<String> {
    match source {
        GpxSource::Path(path) => Ok(std::fs::read_to_string(path)?),
        GpxSource::Bytes(bytes) => String::from_utf8(bytes.clone())
            .map_err(|e| GeofixError::gpx(format!("upload is not UTF-8: {e}"))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const TWO_TRACKS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <name>Morning</name>
    <trkseg>
      <trkpt lat="25.7213" lon="-100.3737"><ele>540</ele></trkpt>
      <trkpt lat="25.7220" lon="-100.3741"><ele>99.9</ele></trkpt>
      <trkpt lat="25.7231" lon="-100.3750"/>
    </trkseg>
    <trkseg>
      <trkpt lat="1" lon="1"/>
    </trkseg>
  </trk>
  <trk>
    <trkseg>
      <trkpt lat="2" lon="2"/>
    </trkseg>
  </trk>
</gpx>"#;

    fn pair(c: &Coordinate) -> (&str, &str) {
        (c.latitude.as_str(), c.longitude.as_str())
    }

    mod line_parsing {
        use super::*;

        #[test]
        fn test_single_manual_line() {
            let coords = parse_coordinate_lines("19.4326,-99.1332").unwrap();
            assert_eq!(coords.len(), 1);
            assert_eq!(pair(&coords[0]), ("19.4326", "-99.1332"));
        }

        #[test]
        fn test_blank_lines_and_whitespace_ignored() {
            let text = "\n  1 , 2  \n\n\t3,4\r\n   \n";
            let coords = parse_coordinate_lines(text).unwrap();
            assert_eq!(coords.len(), 2);
            assert_eq!(pair(&coords[0]), ("1", "2"));
            assert_eq!(pair(&coords[1]), ("3", "4"));
        }

        #[test]
        fn test_splits_on_first_comma() {
            let coords = parse_coordinate_lines("1,2,3").unwrap();
            assert_eq!(pair(&coords[0]), ("1", "2,3"));
        }

        #[test]
        fn test_line_without_comma_is_rejected() {
            let err = parse_coordinate_lines("1,2\n\n19.4326").unwrap_err();
            match err {
                GeofixError::MalformedCoordinate { line, content } => {
                    assert_eq!(line, 3);
                    assert_eq!(content, "19.4326");
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        #[test]
        fn test_empty_component_is_rejected() {
            assert!(parse_coordinate_lines(",2").is_err());
            assert!(parse_coordinate_lines("1, ").is_err());
        }

        #[test]
        fn test_empty_text_yields_nothing() {
            assert!(parse_coordinate_lines("").unwrap().is_empty());
            assert!(parse_coordinate_lines("\n \n").unwrap().is_empty());
        }
    }

    mod gpx_parsing {
        use super::*;

        #[test]
        fn test_first_segment_of_first_track_only() {
            let coords = parse_gpx(TWO_TRACKS).unwrap();
            assert_eq!(coords.len(), 3);
            assert_eq!(pair(&coords[0]), ("25.7213", "-100.3737"));
            assert_eq!(pair(&coords[1]), ("25.7220", "-100.3741"));
            assert_eq!(pair(&coords[2]), ("25.7231", "-100.3750"));
        }

        #[test]
        fn test_reads_attributes_not_element_text() {
            let gpx = r#"<gpx><trk><trkseg><trkpt lat="5" lon="6">7,8</trkpt></trkseg></trk></gpx>"#;
            let coords = parse_gpx(gpx).unwrap();
            assert_eq!(pair(&coords[0]), ("5", "6"));
        }

        #[test]
        fn test_attribute_text_kept_verbatim() {
            let gpx = r#"<gpx><trk><trkseg><trkpt lat="25.721314872473577" lon="-100.37379898123986"/></trkseg></trk></gpx>"#;
            let coords = parse_gpx(gpx).unwrap();
            assert_eq!(coords[0].latitude, "25.721314872473577");
            assert_eq!(coords[0].longitude, "-100.37379898123986");
        }

        #[test]
        fn test_malformed_xml() {
            let err = parse_gpx("<gpx><trk>").unwrap_err();
            assert!(matches!(err, GeofixError::Gpx { .. }));
        }

        #[test]
        fn test_wrong_root() {
            let err = parse_gpx("<kml/>").unwrap_err();
            assert!(err.to_string().contains("<kml>"));
        }

        #[test]
        fn test_missing_track() {
            let err = parse_gpx("<gpx><wpt lat=\"1\" lon=\"2\"/></gpx>").unwrap_err();
            assert!(err.to_string().contains("<trk>"));
        }

        #[test]
        fn test_missing_segment() {
            let err = parse_gpx("<gpx><trk><name>x</name></trk></gpx>").unwrap_err();
            assert!(err.to_string().contains("<trkseg>"));
        }

        #[test]
        fn test_empty_segment() {
            let err = parse_gpx("<gpx><trk><trkseg/></trk></gpx>").unwrap_err();
            assert!(err.to_string().contains("<trkpt>"));
        }

        #[test]
        fn test_point_missing_lon() {
            let err = parse_gpx(r#"<gpx><trk><trkseg><trkpt lat="1"/></trkseg></trk></gpx>"#)
                .unwrap_err();
            assert!(err.to_string().contains("track point 1"));
        }
    }

    mod submission {
        use super::*;
        use std::io::Write;

        #[test]
        fn test_manual_takes_precedence() {
            let sub = Submission::new()
                .with_manual("1,2")
                .with_batch("3,4\n5,6")
                .with_gpx(GpxSource::Bytes(b"not xml".to_vec()));
            let coords = extract_coordinates(&sub).unwrap();
            assert_eq!(coords.len(), 1);
            assert_eq!(pair(&coords[0]), ("1", "2"));
        }

        #[test]
        fn test_batch_before_gpx() {
            let sub = Submission::new()
                .with_batch("3,4\n5,6")
                .with_gpx(GpxSource::Bytes(b"not xml".to_vec()));
            let coords = extract_coordinates(&sub).unwrap();
            assert_eq!(coords.len(), 2);
        }

        #[test]
        fn test_present_but_empty_manual_is_still_honored() {
            let sub = Submission::new().with_manual("").with_batch("3,4");
            assert!(extract_coordinates(&sub).unwrap().is_empty());
        }

        #[test]
        fn test_no_input_is_empty() {
            let sub = Submission::new().with_platform("ios");
            assert!(extract_coordinates(&sub).unwrap().is_empty());
        }

        #[test]
        fn test_gpx_bytes() {
            let sub = Submission::new().with_gpx(GpxSource::Bytes(TWO_TRACKS.as_bytes().to_vec()));
            assert_eq!(extract_coordinates(&sub).unwrap().len(), 3);
        }

        #[test]
        fn test_gpx_bytes_not_utf8() {
            let sub = Submission::new().with_gpx(GpxSource::Bytes(vec![0xff, 0xfe, 0x00]));
            let err = extract_coordinates(&sub).unwrap_err();
            assert!(matches!(err, GeofixError::Gpx { .. }));
        }

        #[test]
        fn test_gpx_path() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            file.write_all(TWO_TRACKS.as_bytes()).unwrap();
            let sub = Submission::new().with_gpx(GpxSource::Path(file.path().to_path_buf()));
            assert_eq!(extract_coordinates(&sub).unwrap().len(), 3);
        }

        #[test]
        fn test_gpx_path_unreadable() {
            let dir = tempfile::TempDir::new().unwrap();
            let sub = Submission::new().with_gpx(GpxSource::Path(dir.path().join("missing.gpx")));
            let err = extract_coordinates(&sub).unwrap_err();
            assert!(matches!(err, GeofixError::Io(_)));
        }

        #[test]
        fn test_platform_resolution() {
            assert_eq!(Submission::new().platform(), Platform::Android);
            assert_eq!(Submission::new().with_platform("IOS").platform(), Platform::Ios);
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn component() -> impl Strategy<Value = String> {
            "-?[0-9]{1,3}\\.[0-9]{1,8}"
        }

        proptest! {
            #[test]
            fn prop_length_and_order_match_non_blank_lines(
                pairs in prop::collection::vec((component(), component()), 1..20),
                blanks in prop::collection::vec(0usize..3, 1..20),
            ) {
                let mut text = String::new();
                for (i, (lat, lon)) in pairs.iter().enumerate() {
                    let pad = blanks.get(i).copied().unwrap_or(0);
                    text.push_str(&"  \n".repeat(pad));
                    text.push_str(&format!("  {lat} ,\t{lon}  \n"));
                }

                let coords = parse_coordinate_lines(&text).unwrap();
                prop_assert_eq!(coords.len(), pairs.len());
                for (c, (lat, lon)) in coords.iter().zip(&pairs) {
                    prop_assert_eq!(&c.latitude, lat);
                    prop_assert_eq!(&c.longitude, lon);
                }
            }
        }
    }
}
