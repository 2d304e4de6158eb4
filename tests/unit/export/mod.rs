use std::{cell::RefCell, path::Path, rc::Rc};

use super::*;
use crate::{assets::source::MemoryAssetSource, export::dialog::FixedDialog};

type Writes = Rc<RefCell<Vec<(PathBuf, Vec<u8>)>>>;

struct RecordingWriter(Writes);

impl FileWriter for RecordingWriter {
    fn write(&mut self, path: &Path, bytes: &[u8]) -> EmojiResult<()> {
        self.0.borrow_mut().push((path.to_path_buf(), bytes.to_vec()));
        Ok(())
    }
}

struct FailingWriter;

impl FileWriter for FailingWriter {
    fn write(&mut self, _path: &Path, _bytes: &[u8]) -> EmojiResult<()> {
        Err(EmojiError::Other(anyhow::anyhow!("disk full")))
    }
}

fn exporter(dialog: FixedDialog) -> (Exporter, Writes) {
    let writes = Writes::default();
    let ex = Exporter::new(Box::new(dialog), Box::new(RecordingWriter(writes.clone())));
    (ex, writes)
}

const HEAD: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="32"><circle cx="16" cy="16" r="15" fill="#fc0"/></svg>"##;
const EYES: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="32"><rect x="10" y="12" width="2" height="3"/></svg>"##;

fn library() -> (AssetLibrary, MemoryAssetSource) {
    let mut png = Vec::new();
    image::DynamicImage::ImageRgba8(image::RgbaImage::from_raw(1, 1, vec![0, 0, 0, 255]).unwrap())
        .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();
    let src = MemoryAssetSource::new()
        .with(Category::Head, "a.svg", HEAD.as_bytes())
        .with(Category::Eyes, "a.svg", EYES.as_bytes())
        .with(Category::Mouth, "m.png", png);
    (AssetLibrary::load(&src), src)
}

#[test]
fn png_export_cancel_writes_nothing() {
    let (mut ex, writes) = exporter(FixedDialog::cancelling());
    let surface = Surface::new(2).unwrap();
    let out = ex
        .export_png(Some(&surface), &StudioConfig::default())
        .unwrap();
    assert_eq!(out, ExportOutcome::Cancelled);
    assert!(writes.borrow().is_empty());
}

#[test]
fn png_export_without_surface_is_skipped() {
    let (mut ex, writes) = exporter(FixedDialog::answering("x.png"));
    let out = ex.export_png(None, &StudioConfig::default()).unwrap();
    assert_eq!(out, ExportOutcome::Skipped);
    assert!(writes.borrow().is_empty());
}

#[test]
fn png_export_writes_encoded_bytes_verbatim() {
    let (mut ex, writes) = exporter(FixedDialog::answering("out.png"));
    let surface = Surface::new(2).unwrap();
    let out = ex
        .export_png(Some(&surface), &StudioConfig::default())
        .unwrap();

    let expected = surface.encode_png().unwrap();
    assert_eq!(
        out,
        ExportOutcome::Saved {
            path: PathBuf::from("out.png"),
            bytes: expected.len()
        }
    );
    assert_eq!(writes.borrow()[0].1, expected);
}

#[test]
fn svg_export_with_only_head_contains_head_children() {
    let (lib, src) = library();
    let (mut ex, writes) = exporter(FixedDialog::answering("e.svg"));
    let selection = PerCategory([0, 0, 0, 0, 0]);
    ex.export_svg(&lib, &src, &selection, &StudioConfig::default())
        .unwrap();

    let written = String::from_utf8(writes.borrow()[0].1.clone()).unwrap();
    assert!(written.contains(r#"viewBox="0 0 32 32""#));
    assert!(written.contains(r##"<circle cx="16" cy="16" r="15" fill="#fc0"/>"##));
    assert!(!written.contains("<rect"));
}

#[test]
fn svg_export_skips_raster_variants_and_keeps_order() {
    let (lib, src) = library();
    let selection = PerCategory([0, 1, 0, 1, 0]);
    let docs = selected_svg_documents(&lib, &src, &selection).unwrap();
    assert_eq!(docs, [HEAD, EYES]);
}

#[test]
fn write_failure_surfaces_as_export_error() {
    let mut ex = Exporter::new(
        Box::new(FixedDialog::answering("x.png")),
        Box::new(FailingWriter),
    );
    let surface = Surface::new(1).unwrap();
    let err = ex
        .export_png(Some(&surface), &StudioConfig::default())
        .unwrap_err();
    assert!(matches!(err, EmojiError::Export(_)));
    assert!(err.to_string().contains("disk full"));
}
