use async_trait::async_trait;
use genstudio::models::wire::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, Part, PredictRequest,
    PredictResponse, Prediction,
};
use genstudio::studio::{BusyFlag, LightboxEvent, LightboxState, StatusMessage};
use genstudio::{
    GenerationOutcome, ImageService, ModelConfig, Result, StudioController, StudioError,
    ValidationError,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

const EDIT_MODEL: &str = "gemini-2.5-flash-image-preview";
const ULTRA_MODEL: &str = "imagen-4.0-ultra-generate-001";
const IMAGEN_MODEL: &str = "imagen-4.0-generate-001";

#[derive(Debug, Clone)]
enum Call {
    Predict(String, PredictRequest),
    Content(String, GenerateContentRequest),
}

/// Answers with canned bodies and records every request it receives.
#[derive(Default)]
struct RecordingService {
    predictions: Vec<Prediction>,
    parts: Vec<Part>,
    fail: bool,
    calls: Mutex<Vec<Call>>,
}

impl RecordingService {
    fn with_images(count: usize) -> Self {
        Self {
            predictions: (0..count)
                .map(|i| Prediction {
                    bytes_base64_encoded: Some(base64_of(i as u8)),
                    mime_type: Some("image/jpeg".into()),
                    rai_filtered_reason: None,
                })
                .collect(),
            ..Default::default()
        }
    }

    fn with_parts(parts: Vec<Part>) -> Self {
        Self {
            parts,
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

fn base64_of(byte: u8) -> String {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD.encode([byte])
}

#[async_trait]
impl ImageService for RecordingService {
    async fn generate_images(
        &self,
        model: &str,
        request: &PredictRequest,
    ) -> Result<PredictResponse> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Predict(model.to_string(), request.clone()));
        if self.fail {
            return Err(StudioError::Request("dns error".into()));
        }
        let count = request.parameters.sample_count as usize;
        Ok(PredictResponse {
            predictions: self.predictions.iter().take(count).cloned().collect(),
        })
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Content(model.to_string(), request.clone()));
        if self.fail {
            return Err(StudioError::Service {
                status: 500,
                message: "internal".into(),
            });
        }
        Ok(GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(Content {
                    role: Some("model".into()),
                    parts: self.parts.clone(),
                }),
                finish_reason: Some("STOP".into()),
            }],
        })
    }
}

/// Never answers; records whether the generate control was disabled when called.
#[derive(Default)]
struct StalledService {
    control: Mutex<Option<BusyFlag>>,
    busy_during_call: Mutex<Option<bool>>,
}

impl StalledService {
    fn observe(&self) {
        let busy = self.control.lock().unwrap().as_ref().map(BusyFlag::is_busy);
        *self.busy_during_call.lock().unwrap() = busy;
    }
}

#[async_trait]
impl ImageService for StalledService {
    async fn generate_images(
        &self,
        _model: &str,
        _request: &PredictRequest,
    ) -> Result<PredictResponse> {
        self.observe();
        futures::future::pending().await
    }

    async fn generate_content(
        &self,
        _model: &str,
        _request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        self.observe();
        futures::future::pending().await
    }
}

fn controller(service: &Arc<RecordingService>) -> StudioController {
    StudioController::new(service.clone(), ModelConfig::default())
}

fn reference_images(dir: &TempDir, count: usize) -> Vec<PathBuf> {
    (0..count)
        .map(|i| {
            let path = dir.path().join(format!("ref-{}.jpg", i));
            std::fs::write(&path, [0xFF, 0xD8, i as u8]).unwrap();
            path
        })
        .collect()
}

#[tokio::test]
async fn red_fox_batch_renders_three_tiles() {
    let service = Arc::new(RecordingService::with_images(4));
    let mut studio = controller(&service);
    studio.select_model(IMAGEN_MODEL);
    studio.set_batch_size(3).unwrap();
    studio.set_aspect_ratio("1:1").unwrap();
    studio.set_prompt("a red fox in snow");

    let outcome = studio.generate().await.unwrap();

    assert_eq!(outcome.images().len(), 3);
    let calls = service.calls();
    assert_eq!(calls.len(), 1);
    match &calls[0] {
        Call::Predict(model, request) => {
            assert_eq!(model, IMAGEN_MODEL);
            assert_eq!(request.parameters.sample_count, 3);
            assert_eq!(request.parameters.aspect_ratio, "1:1");
            assert_eq!(request.parameters.output_options.mime_type, "image/jpeg");
            assert_eq!(request.instances[0].prompt, "a red fox in snow");
        }
        other => panic!("unexpected call: {:?}", other),
    }
    assert_eq!(
        studio.gallery().filenames(),
        vec![
            "generated-a_red_fox_in_snow-1.jpeg",
            "generated-a_red_fox_in_snow-2.jpeg",
            "generated-a_red_fox_in_snow-3.jpeg",
        ]
    );
    let ordinals: Vec<usize> = studio.gallery().tiles().iter().map(|t| t.ordinal).collect();
    assert_eq!(ordinals, vec![0, 1, 2]);
    assert!(studio.is_generate_enabled());
}

#[tokio::test]
async fn ultra_requests_a_single_image() {
    let service = Arc::new(RecordingService::with_images(4));
    let mut studio = controller(&service);
    studio.set_batch_size(4).unwrap();
    studio.set_aspect_ratio("16:9").unwrap();
    studio.select_model(ULTRA_MODEL);

    assert_eq!(studio.selector().settings().batch_size, 1);
    assert!(!studio.selector().is_batch_size_enabled());
    assert!(matches!(
        studio.set_batch_size(2),
        Err(StudioError::Validation(ValidationError::BatchSizeLocked))
    ));

    studio.set_prompt("a lighthouse at night");
    studio.generate().await.unwrap();
    assert_eq!(studio.gallery().tiles().len(), 1);
    match &service.calls()[0] {
        Call::Predict(model, request) => {
            assert_eq!(model, ULTRA_MODEL);
            assert_eq!(request.parameters.sample_count, 1);
            assert_eq!(request.parameters.aspect_ratio, "1:1");
        }
        other => panic!("unexpected call: {:?}", other),
    }

    studio.select_model(IMAGEN_MODEL);
    assert!(studio.selector().is_batch_size_enabled());
    assert_eq!(studio.selector().settings().batch_size, 1);
}

#[tokio::test]
async fn edit_without_uploads_fails_before_any_request() {
    let service = Arc::new(RecordingService::default());
    let mut studio = controller(&service);
    studio.select_model(EDIT_MODEL);
    studio.set_prompt("make it autumn");

    let err = studio.generate().await.unwrap_err();

    assert!(matches!(
        err,
        StudioError::Validation(ValidationError::MissingReferenceImage)
    ));
    assert!(service.calls().is_empty());
    assert_eq!(
        studio.gallery().status(),
        Some(&StatusMessage::Error(
            "Please upload at least one image to edit.".into()
        ))
    );
    assert!(studio.is_generate_enabled());
}

#[tokio::test]
async fn empty_prompt_is_rejected() {
    let service = Arc::new(RecordingService::with_images(1));
    let mut studio = controller(&service);

    let err = studio.generate().await.unwrap_err();

    assert_eq!(err.user_message(), "Please enter a prompt.");
    assert!(service.calls().is_empty());
}

#[tokio::test]
async fn edit_with_text_only_response_shows_no_image_message() {
    let dir = TempDir::new().unwrap();
    let service = Arc::new(RecordingService::with_parts(vec![Part::text(
        "I would rather describe it.",
    )]));
    let mut studio = controller(&service);
    studio.select_model(EDIT_MODEL);
    studio
        .select_files(&reference_images(&dir, 2))
        .await
        .unwrap();
    studio.set_prompt("merge these");

    let outcome = studio.generate().await.unwrap();

    assert!(matches!(outcome, GenerationOutcome::NoImage { .. }));
    assert!(studio.gallery().tiles().is_empty());
    assert_eq!(
        studio.gallery().status(),
        Some(&StatusMessage::Info(
            "The model did not return an image. It might have responded with text only.".into()
        ))
    );
    match &service.calls()[0] {
        Call::Content(model, request) => {
            assert_eq!(model, EDIT_MODEL);
            let parts = &request.contents[0].parts;
            assert_eq!(parts.len(), 3);
            assert!(parts[0].inline_data.is_some());
            assert!(parts[1].inline_data.is_some());
            assert_eq!(parts[2], Part::text("merge these"));
        }
        other => panic!("unexpected call: {:?}", other),
    }
}

#[tokio::test]
async fn edit_results_are_named_after_the_edited_prompt() {
    let dir = TempDir::new().unwrap();
    let service = Arc::new(RecordingService::with_parts(vec![
        Part::text("Here is your image"),
        Part::inline("image/png", base64_of(7)),
    ]));
    let mut studio = controller(&service);
    studio.select_model(EDIT_MODEL);
    studio
        .select_files(&reference_images(&dir, 1))
        .await
        .unwrap();
    studio.set_prompt("add a hat");

    studio.generate().await.unwrap();

    assert_eq!(
        studio.gallery().filenames(),
        vec!["generated-edited-add_a_hat-1.png"]
    );
    assert_eq!(studio.gallery().tiles()[0].bytes, vec![7]);
}

#[tokio::test]
async fn leaving_edit_mode_clears_uploads() {
    let dir = TempDir::new().unwrap();
    let service = Arc::new(RecordingService::default());
    let mut studio = controller(&service);
    studio.select_model(EDIT_MODEL);
    studio
        .select_files(&reference_images(&dir, 3))
        .await
        .unwrap();
    assert_eq!(studio.uploads().len(), 3);

    studio.select_model(ULTRA_MODEL);
    assert!(studio.uploads().is_empty());
    assert!(studio.uploads().previews().is_empty());

    studio.select_model(EDIT_MODEL);
    assert!(studio.uploads().is_empty());
}

#[tokio::test]
async fn more_than_five_files_keeps_the_first_five() {
    let dir = TempDir::new().unwrap();
    let files = reference_images(&dir, 6);
    let service = Arc::new(RecordingService::default());
    let mut studio = controller(&service);
    studio.select_model(EDIT_MODEL);

    let report = studio.select_files(&files).await.unwrap();

    assert!(report.warning.is_some());
    assert_eq!(report.dropped, 1);
    let firsts: Vec<u8> = studio.uploads().images().iter().map(|i| i.bytes[2]).collect();
    assert_eq!(firsts, vec![0, 1, 2, 3, 4]);
    assert!(studio
        .uploads()
        .images()
        .iter()
        .all(|image| image.media_type == "image/jpeg"));
}

#[tokio::test]
async fn uploads_are_refused_outside_edit_mode() {
    let dir = TempDir::new().unwrap();
    let service = Arc::new(RecordingService::default());
    let mut studio = controller(&service);

    let err = studio
        .select_files(&reference_images(&dir, 1))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StudioError::Validation(ValidationError::UploadsNotAccepted(_))
    ));
    assert_eq!(
        err.user_message(),
        format!("Reference images are only used by {}.", EDIT_MODEL)
    );
    assert!(studio.uploads().is_empty());
}

#[tokio::test]
async fn service_failure_shows_generic_message_and_reenables() {
    let service = Arc::new(RecordingService {
        fail: true,
        ..Default::default()
    });
    let mut studio = controller(&service);
    studio.set_prompt("a red fox in snow");

    let err = studio.generate().await.unwrap_err();

    assert!(matches!(err, StudioError::Generation { .. }));
    assert_eq!(
        studio.gallery().status(),
        Some(&StatusMessage::Error(
            "Error: Could not generate images. Check the console.".into()
        ))
    );
    assert!(studio.is_generate_enabled());
}

#[tokio::test]
async fn new_generation_discards_previous_batch() {
    let service = Arc::new(RecordingService::with_images(4));
    let mut studio = controller(&service);
    studio.set_batch_size(4).unwrap();
    studio.set_prompt("first");
    studio.generate().await.unwrap();
    assert_eq!(studio.gallery().tiles().len(), 4);

    studio.set_batch_size(2).unwrap();
    studio.set_prompt("second");
    studio.generate().await.unwrap();

    assert_eq!(
        studio.gallery().filenames(),
        vec!["generated-second-1.jpeg", "generated-second-2.jpeg"]
    );
}

#[tokio::test]
async fn busy_control_rejects_second_generation() {
    let service = Arc::new(RecordingService::with_images(1));
    let mut studio = controller(&service);
    studio.set_prompt("fox");

    let control = studio.generate_control();
    let guard = control.acquire().unwrap();
    assert!(!studio.is_generate_enabled());
    assert!(matches!(studio.generate().await, Err(StudioError::Busy)));
    assert!(service.calls().is_empty());

    drop(guard);
    assert!(studio.generate().await.is_ok());
}

#[tokio::test]
async fn in_flight_generation_shows_loading_and_disables_control() {
    let service = Arc::new(StalledService::default());
    let mut studio = StudioController::new(service.clone(), ModelConfig::default());
    *service.control.lock().unwrap() = Some(studio.generate_control());
    studio.set_prompt("a red fox in snow");

    {
        let mut generation = Box::pin(studio.generate());
        assert!(futures::poll!(generation.as_mut()).is_pending());
    }

    assert_eq!(*service.busy_during_call.lock().unwrap(), Some(true));
    assert_eq!(studio.gallery().status(), Some(&StatusMessage::Loading));
    assert!(studio.gallery().tiles().is_empty());
    assert!(studio.is_generate_enabled());
}

#[tokio::test]
async fn lightbox_opens_on_tile_and_closes_on_escape() {
    let service = Arc::new(RecordingService::with_images(2));
    let mut studio = controller(&service);
    studio.set_batch_size(2).unwrap();
    studio.set_prompt("fox");
    studio.generate().await.unwrap();

    assert!(!studio.open_tile(9));
    assert!(studio.open_tile(1));
    let expected_source = studio.gallery().tiles()[1].source.clone();
    match studio.lightbox().state() {
        LightboxState::Open(image) => assert_eq!(image.source, expected_source),
        LightboxState::Closed => panic!("lightbox should be open"),
    }
    assert!(studio.lightbox().is_scroll_locked());

    assert!(studio.lightbox_event(&LightboxEvent::KeyPress("Escape".into())));
    assert_eq!(studio.lightbox().state(), &LightboxState::Closed);
    assert!(!studio.lightbox().is_scroll_locked());
}
