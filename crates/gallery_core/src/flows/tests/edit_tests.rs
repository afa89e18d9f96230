use super::*;

fn stars() -> Image {
    Image {
        id: ImageId::from(2),
        title: "Stars".to_string(),
        description: "Milky way over the ridge".to_string(),
        url: "/uploads/2.png".to_string(),
    }
}

#[test]
fn seeds_draft_from_the_target_image() {
    let flow = EditFlow::seed(&stars());

    assert_eq!(flow.phase(), EditPhase::Prefilled);
    assert_eq!(flow.draft().image_id, ImageId::from(2));
    assert_eq!(flow.draft().title, "Stars");
    assert_eq!(flow.draft().description, "Milky way over the ridge");
    assert!(flow.error().is_none());
}

#[test]
fn seeding_twice_yields_identical_drafts() {
    let first = EditFlow::seed(&stars());
    let second = EditFlow::seed(&stars());
    assert_eq!(first.draft(), second.draft());
}

#[test]
fn submit_sends_full_replacement_of_both_fields() {
    let mut flow = EditFlow::seed(&stars());
    flow.set_title("Star trails");

    let (id, request) = flow.begin_submit().expect("submit");

    assert_eq!(id, ImageId::from(2));
    assert_eq!(
        request,
        UpdateImageRequest {
            title: "Star trails".to_string(),
            description: "Milky way over the ridge".to_string(),
        }
    );
    assert_eq!(flow.phase(), EditPhase::Submitting);
}

#[test]
fn both_fields_are_required() {
    let mut flow = EditFlow::seed(&stars());
    flow.set_title(" ");
    assert_eq!(flow.begin_submit().unwrap_err(), ValidationError::EmptyTitle);

    flow.set_title("Stars");
    flow.set_description("");
    assert_eq!(
        flow.begin_submit().unwrap_err(),
        ValidationError::EmptyDescription
    );
    assert_eq!(flow.phase(), EditPhase::Prefilled);
    assert_eq!(
        flow.error(),
        Some(&GalleryError::Validation(ValidationError::EmptyDescription))
    );
}

#[test]
fn image_without_description_must_gain_one_before_saving() {
    let mut image = stars();
    image.description.clear();
    let mut flow = EditFlow::seed(&image);

    assert_eq!(
        flow.begin_submit().unwrap_err(),
        ValidationError::EmptyDescription
    );
    flow.set_description("added later");
    flow.begin_submit().expect("submit");
}

#[test]
fn edits_are_frozen_while_submitting() {
    let mut flow = EditFlow::seed(&stars());
    flow.begin_submit().expect("submit");

    flow.set_title("late edit");
    flow.set_description("late edit");

    assert_eq!(flow.draft().title, "Stars");
    assert_eq!(
        flow.begin_submit().unwrap_err(),
        ValidationError::SubmissionInProgress
    );
}

#[test]
fn failure_keeps_the_draft_and_shows_the_error() {
    let mut flow = EditFlow::seed(&stars());
    flow.set_title("Star trails");
    flow.begin_submit().expect("submit");

    flow.fail(GalleryError::Server {
        status: 500,
        message: None,
    });

    assert_eq!(flow.phase(), EditPhase::Prefilled);
    assert_eq!(flow.draft().title, "Star trails");
    assert!(matches!(
        flow.error(),
        Some(GalleryError::Server { status: 500, .. })
    ));
}
