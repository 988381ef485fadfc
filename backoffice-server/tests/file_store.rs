//! File store integration tests (tempdir-backed uploads root).
//! Run: cargo test -p backoffice-server --test file_store

use std::io::Cursor;

use backoffice_server::services::{FileStore, UploadKind};
use image::{ImageBuffer, Rgb};

fn sample_png() -> Vec<u8> {
    let img = image::DynamicImage::ImageRgb8(ImageBuffer::from_pixel(4, 4, Rgb([120, 30, 200])));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn save_reencodes_to_jpg_and_delete_is_best_effort() {
    let tmp = tempfile::tempdir().unwrap();
    let store = FileStore::new(tmp.path().to_path_buf());
    store.ensure_layout().unwrap();

    let public_path = store
        .save_image(UploadKind::Recharges, &sample_png())
        .unwrap();
    assert!(public_path.starts_with("/uploads/recharges/"));
    assert!(public_path.ends_with(".jpg"));

    let rel = public_path.strip_prefix("/uploads/").unwrap();
    let on_disk = tmp.path().join(rel);
    assert!(on_disk.exists());

    // Stored bytes decode as JPEG
    let stored = std::fs::read(&on_disk).unwrap();
    assert!(image::load_from_memory(&stored).is_ok());

    store.delete(&public_path);
    assert!(!on_disk.exists());

    // Deleting again (or a path outside the root) only logs
    store.delete(&public_path);
    store.delete("/etc/passwd");
}

#[test]
fn rejects_non_image_payloads() {
    let tmp = tempfile::tempdir().unwrap();
    let store = FileStore::new(tmp.path().to_path_buf());
    store.ensure_layout().unwrap();

    let err = store.save_image(UploadKind::Products, b"definitely not an image");
    assert!(err.is_err());

    // Nothing got written
    let entries: Vec<_> = std::fs::read_dir(tmp.path().join("products"))
        .unwrap()
        .collect();
    assert!(entries.is_empty());
}
