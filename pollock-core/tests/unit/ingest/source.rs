use super::*;

fn strict() -> IngestPolicy {
    IngestPolicy::default()
}

fn lenient() -> IngestPolicy {
    IngestPolicy {
        accept: AcceptPolicy::AnyImage,
        max_file_bytes: None,
        ..IngestPolicy::default()
    }
}

#[test]
fn strict_accepts_jpeg_and_png_by_mime_or_extension() {
    for file in [
        SelectedFile::new("a.jpg", "image/jpeg", 10),
        SelectedFile::new("a.bin", "image/png", 10),
        SelectedFile::new("PHOTO.JPEG", "", 10),
        SelectedFile::new("shot.png", "application/octet-stream", 10),
    ] {
        validate_selection(&file, &strict()).unwrap();
    }
}

#[test]
fn strict_rejects_other_types() {
    for file in [
        SelectedFile::new("a.gif", "image/gif", 10),
        SelectedFile::new("notes.txt", "text/plain", 10),
        SelectedFile::new("noext", "", 10),
    ] {
        let err = validate_selection(&file, &strict()).unwrap_err();
        assert!(
            matches!(err, PollockError::InvalidFileType { .. }),
            "{file:?}: {err}"
        );
    }
}

#[test]
fn any_image_matches_image_mime_pattern() {
    validate_selection(&SelectedFile::new("a.gif", "image/gif", 10), &lenient()).unwrap();
    validate_selection(&SelectedFile::new("a", "IMAGE/WEBP", 10), &lenient()).unwrap();

    for mime in ["text/plain", "image/", "", "application/image"] {
        let err =
            validate_selection(&SelectedFile::new("a.png", mime, 10), &lenient()).unwrap_err();
        assert!(matches!(err, PollockError::InvalidFileType { .. }), "{mime}");
    }
}

#[test]
fn size_cap_rejects_sizes_that_round_up_to_the_limit() {
    let policy = strict();
    let limit = policy.max_file_bytes.unwrap();

    validate_selection(&SelectedFile::new("a.png", "image/png", 1_048_523), &policy).unwrap();

    for size in [1_048_524, limit - 1, limit, limit + 1] {
        let err = validate_selection(&SelectedFile::new("a.png", "image/png", size), &policy)
            .unwrap_err();
        assert!(matches!(err, PollockError::FileTooLarge { limit: l, .. } if l == limit));
    }
}

#[test]
fn size_cap_rounding_scales_with_custom_limits() {
    let policy = IngestPolicy {
        max_file_bytes: Some(100_000),
        ..strict()
    };
    validate_selection(&SelectedFile::new("a.png", "image/png", 99_994), &policy).unwrap();
    assert!(validate_selection(&SelectedFile::new("a.png", "image/png", 99_995), &policy).is_err());
}

#[test]
fn size_cap_absent_allows_large_files() {
    validate_selection(
        &SelectedFile::new("big.png", "image/png", 50 * 1024 * 1024),
        &lenient(),
    )
    .unwrap();
}

#[test]
fn type_is_checked_before_size() {
    let err = validate_selection(
        &SelectedFile::new("big.gif", "image/gif", 10 * 1024 * 1024),
        &strict(),
    )
    .unwrap_err();
    assert!(matches!(err, PollockError::InvalidFileType { .. }));
}

#[test]
fn rejection_names_the_file_when_mime_is_missing() {
    let err = validate_selection(&SelectedFile::new("doc.pdf", "", 1), &strict()).unwrap_err();
    match err {
        PollockError::InvalidFileType { mime, accepted } => {
            assert_eq!(mime, "doc.pdf");
            assert_eq!(accepted, "a .jpg or .png image");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn from_path_reads_size_and_guesses_mime() {
    let dir = std::path::PathBuf::from("target").join("ingest_source_from_path");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("tiny.png");
    std::fs::write(&path, [0u8; 7]).unwrap();

    let file = SelectedFile::from_path(&path).unwrap();
    assert_eq!(file.name, "tiny.png");
    assert_eq!(file.mime, "image/png");
    assert_eq!(file.size, 7);

    assert!(SelectedFile::from_path(&dir.join("missing.png")).is_err());
}
