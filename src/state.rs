use crate::upload::{UploadError, UploadReceipt};

/// Identifies one upload. Only the most recently issued ticket is honoured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UploadTicket(u64);

/// A selection that must now be sent to the server.
#[derive(Debug)]
pub struct PendingUpload<F> {
    pub ticket: UploadTicket,
    pub file: F,
}

/// Which branch the panel renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelView<'a> {
    Empty,
    HasVideo(&'a str),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PanelState {
    video_url: String,
    in_flight: Option<UploadTicket>,
    issued: u64,
    error: Option<UploadError>,
    last_receipt: Option<UploadReceipt>,
}

impl PanelState {
    pub fn with_video_url(url: impl Into<String>) -> Self {
        let mut state = Self::default();
        state.set_video_url(url);
        state
    }

    pub fn view(&self) -> PanelView<'_> {
        if self.video_url.is_empty() {
            PanelView::Empty
        } else {
            PanelView::HasVideo(&self.video_url)
        }
    }

    pub fn is_uploading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn error(&self) -> Option<&UploadError> {
        self.error.as_ref()
    }

    pub fn last_receipt(&self) -> Option<&UploadReceipt> {
        self.last_receipt.as_ref()
    }

    /// Takes a picker result. `None` (dialog dismissed) changes nothing and
    /// produces no upload.
    pub fn select_file<F>(&mut self, file: Option<F>) -> Option<PendingUpload<F>> {
        let file = file?;

        self.issued += 1;
        let ticket = UploadTicket(self.issued);
        self.in_flight = Some(ticket);
        self.error = None;
        self.last_receipt = None;

        Some(PendingUpload { ticket, file })
    }

    /// Applies an upload result. Returns `false` when the ticket is stale and
    /// the result was dropped.
    pub fn finish_upload<P>(
        &mut self,
        ticket: UploadTicket,
        result: Result<UploadReceipt, UploadError>,
        preview: P,
    ) -> bool
    where
        P: FnOnce(&UploadReceipt) -> Option<String>,
    {
        if self.in_flight != Some(ticket) {
            return false;
        }
        self.in_flight = None;

        match result {
            Ok(receipt) => {
                if let Some(url) = preview(&receipt) {
                    self.set_video_url(url);
                }
                self.last_receipt = Some(receipt);
            }
            Err(e) => self.error = Some(e),
        }
        true
    }

    pub fn set_video_url(&mut self, url: impl Into<String>) {
        self.video_url = url.into();
    }

    /// Back to the picker. Any upload still running will be ignored when it lands.
    pub fn remove_video(&mut self) {
        self.video_url.clear();
        self.in_flight = None;
    }

    /// Stops waiting on the running upload. Its result is dropped if it ever lands.
    pub fn cancel_upload(&mut self) -> bool {
        self.in_flight.take().is_some()
    }

    pub fn dismiss_error(&mut self) -> bool {
        self.error.take().is_some()
    }
}
