use super::*;
use futures::executor::block_on;
use std::cell::RefCell;

/// A picked file, minus the bytes.
#[derive(Debug)]
struct PickedFile(&'static str);

#[derive(Debug, PartialEq)]
struct SentRequest {
    url: String,
    field: String,
    file_name: String,
}

struct RecordingClient {
    reply: Result<HttpReply, UploadError>,
    sent: RefCell<Vec<SentRequest>>,
}

impl RecordingClient {
    fn answering(status: u16, status_text: &str, body: &str) -> Self {
        Self {
            reply: Ok(HttpReply {
                status,
                status_text: status_text.to_string(),
                body: body.to_string(),
            }),
            sent: RefCell::new(Vec::new()),
        }
    }

    fn failing(error: UploadError) -> Self {
        Self {
            reply: Err(error),
            sent: RefCell::new(Vec::new()),
        }
    }
}

#[async_trait(?Send)]
impl UploadClient for RecordingClient {
    type File = PickedFile;

    async fn post_multipart(
        &self,
        url: &str,
        field: &str,
        file: &PickedFile,
    ) -> Result<HttpReply, UploadError> {
        self.sent.borrow_mut().push(SentRequest {
            url: url.to_string(),
            field: field.to_string(),
            file_name: file.0.to_string(),
        });
        self.reply.clone()
    }
}

const URL: &str = "http://localhost:8080/upload-video";

#[test]
fn posts_once_under_file_field() {
    let client = RecordingClient::answering(200, "OK", r#""videos/42/.mp4""#);

    let receipt = block_on(upload_video(&client, URL, &PickedFile("match.mp4"))).unwrap();

    assert_eq!(
        client.sent.into_inner(),
        vec![SentRequest {
            url: URL.to_string(),
            field: "file".to_string(),
            file_name: "match.mp4".to_string(),
        }]
    );
    assert_eq!(receipt.video_path.as_deref(), Some("videos/42/.mp4"));
}

#[test]
fn non_success_status_is_rejected() {
    let client = RecordingClient::answering(500, "Internal Server Error", r#"{"detail":"boom"}"#);

    let result = block_on(upload_video(&client, URL, &PickedFile("a.mp4")));

    assert_eq!(
        result,
        Err(UploadError::Rejected {
            status: 500,
            status_text: "Internal Server Error".to_string(),
        })
    );
    assert_eq!(client.sent.borrow().len(), 1);
}

#[test]
fn network_failure_passes_through() {
    let client = RecordingClient::failing(UploadError::Network("connection refused".to_string()));

    let result = block_on(upload_video(&client, URL, &PickedFile("a.mp4")));

    assert_eq!(
        result,
        Err(UploadError::Network("connection refused".to_string()))
    );
}

#[test]
fn any_2xx_counts_as_success() {
    let client = RecordingClient::answering(204, "No Content", "");

    let receipt = block_on(upload_video(&client, URL, &PickedFile("a.mp4"))).unwrap();

    assert_eq!(receipt, UploadReceipt::default());
}

#[test]
fn receipt_reads_detailed_object() {
    let receipt = UploadReceipt::from_body(
        r#"{"message":"Video uploaded successfully","video_path":"videos/7/.webm"}"#,
    );
    assert_eq!(receipt.video_path.as_deref(), Some("videos/7/.webm"));
    assert_eq!(receipt.message.as_deref(), Some("Video uploaded successfully"));
}

#[test]
fn receipt_tolerates_unknown_bodies() {
    assert_eq!(UploadReceipt::from_body("<html>ok</html>"), UploadReceipt::default());
    assert_eq!(UploadReceipt::from_body(r#""""#), UploadReceipt::default());
    assert_eq!(UploadReceipt::from_body("   "), UploadReceipt::default());
}

#[test]
fn errors_read_well() {
    let rejected = UploadError::Rejected {
        status: 413,
        status_text: "Payload Too Large".to_string(),
    };
    assert_eq!(rejected.to_string(), "Upload rejected: 413 Payload Too Large");
    assert_eq!(
        UploadError::TimedOut(30_000).to_string(),
        "Upload timed out after 30000 ms"
    );
}
