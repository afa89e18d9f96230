use super::*;

fn png(name: &str) -> ImageFile {
    ImageFile::new(name, Some("image/png".to_string()), b"png".to_vec())
}

fn text(name: &str) -> ImageFile {
    ImageFile::new(name, Some("text/plain".to_string()), b"txt".to_vec())
}

#[test]
fn starts_empty_and_cannot_submit() {
    let mut flow = UploadFlow::new();

    assert_eq!(flow.phase(), UploadPhase::Empty);
    assert!(!flow.can_submit());
    assert_eq!(flow.begin_submit().unwrap_err(), ValidationError::NoFileSelected);
    assert_eq!(flow.phase(), UploadPhase::Empty);
    assert!(flow.error().is_some_and(GalleryError::is_validation));
}

#[test]
fn selecting_a_file_seeds_the_title_without_the_final_extension() {
    let mut flow = UploadFlow::new();

    flow.select_files([png("aurora.photo.png")]).expect("select");

    assert_eq!(flow.phase(), UploadPhase::Selected);
    assert_eq!(flow.draft().title, "aurora.photo");
    assert!(flow.can_submit());
}

#[test]
fn only_the_first_image_of_a_drop_is_kept() {
    let mut flow = UploadFlow::new();

    flow.select_files([text("notes.txt"), png("first.png"), png("second.png")])
        .expect("select");

    let file = flow.draft().file.as_ref().expect("file");
    assert_eq!(file.name, "first.png");
    assert_eq!(flow.draft().title, "first");
}

#[test]
fn drop_without_images_is_rejected_and_keeps_the_draft() {
    let mut flow = UploadFlow::new();
    flow.select_files([png("moon.png")]).expect("select");

    let err = flow
        .select_files([text("notes.txt")])
        .expect_err("must reject");

    assert_eq!(
        err,
        ValidationError::UnsupportedMediaType {
            name: "notes.txt".to_string()
        }
    );
    assert_eq!(flow.draft().file.as_ref().map(|f| f.name.as_str()), Some("moon.png"));
    assert_eq!(flow.phase(), UploadPhase::Selected);
}

#[test]
fn empty_drop_reports_missing_file() {
    let mut flow = UploadFlow::new();
    assert_eq!(
        flow.select_files(Vec::new()).unwrap_err(),
        ValidationError::NoFileSelected
    );
}

#[test]
fn title_and_description_are_editable_before_submission() {
    let mut flow = UploadFlow::new();
    flow.select_files([png("aurora.png")]).expect("select");

    flow.set_title("Northern lights");
    flow.set_description("Taken at 2am");
    let request = flow.begin_submit().expect("submit");

    assert_eq!(request.title, "Northern lights");
    assert_eq!(request.description, "Taken at 2am");
    assert_eq!(request.file.name, "aurora.png");
    assert_eq!(flow.phase(), UploadPhase::Submitting);
}

#[test]
fn extensionless_name_needs_a_typed_title() {
    let mut flow = UploadFlow::new();
    flow.select_files([png("capture")]).expect("select");

    assert_eq!(flow.draft().title, "");
    assert_eq!(flow.phase(), UploadPhase::Selected);
    assert!(!flow.can_submit());
    assert_eq!(flow.begin_submit().unwrap_err(), ValidationError::EmptyTitle);

    flow.set_title("   ");
    assert!(!flow.can_submit());

    flow.set_title("Capture");
    assert!(flow.can_submit());
    flow.begin_submit().expect("submit");
}

#[test]
fn blank_title_blocks_submission() {
    let mut flow = UploadFlow::new();
    flow.select_files([png("aurora.png")]).expect("select");
    flow.set_title("   ");

    assert_eq!(flow.begin_submit().unwrap_err(), ValidationError::EmptyTitle);
    assert_eq!(flow.phase(), UploadPhase::Selected);
}

#[test]
fn submitting_freezes_the_draft_and_refuses_resubmission() {
    let mut flow = UploadFlow::new();
    flow.select_files([png("aurora.png")]).expect("select");
    flow.begin_submit().expect("submit");

    flow.set_title("changed");
    flow.set_description("changed");

    assert_eq!(flow.draft().title, "aurora");
    assert_eq!(flow.draft().description, "");
    assert_eq!(
        flow.begin_submit().unwrap_err(),
        ValidationError::SubmissionInProgress
    );
    assert_eq!(
        flow.select_files([png("other.png")]).unwrap_err(),
        ValidationError::SubmissionInProgress
    );
    assert!(!flow.can_submit());
}

#[test]
fn failure_returns_to_selected_with_error() {
    let mut flow = UploadFlow::new();
    flow.select_files([png("aurora.png")]).expect("select");
    flow.begin_submit().expect("submit");

    flow.fail(GalleryError::Network("connection reset".into()));

    assert_eq!(flow.phase(), UploadPhase::Selected);
    assert_eq!(
        flow.error(),
        Some(&GalleryError::Network("connection reset".into()))
    );
    assert!(flow.can_submit());
    flow.begin_submit().expect("retry");
    assert!(flow.error().is_none());
}
