/// Losses recorded at the end of one training epoch.
///
/// # Fields
///
/// - `epoch` - 1-based epoch number
/// - `loss` - Average training loss over the epoch
/// - `val_loss` - Average validation loss, when a validation split is configured
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochSummary {
    pub epoch: usize,
    pub loss: f64,
    pub val_loss: Option<f64>,
}

/// Per-epoch losses returned by `Sequential::fit`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingHistory {
    epochs: Vec<EpochSummary>,
}

impl TrainingHistory {
    pub fn new() -> Self {
        TrainingHistory::default()
    }

    pub(crate) fn push(&mut self, summary: EpochSummary) {
        self.epochs.push(summary);
    }

    pub fn epochs(&self) -> &[EpochSummary] {
        &self.epochs
    }

    /// Training losses in epoch order.
    pub fn losses(&self) -> Vec<f64> {
        self.epochs.iter().map(|e| e.loss).collect()
    }

    /// Validation losses in epoch order, empty when training ran without validation.
    pub fn val_losses(&self) -> Vec<f64> {
        self.epochs.iter().filter_map(|e| e.val_loss).collect()
    }

    pub fn last(&self) -> Option<&EpochSummary> {
        self.epochs.last()
    }

    pub fn len(&self) -> usize {
        self.epochs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }
}

/// Formats the per-epoch report line, e.g. `Epoch 3/10, loss: 0.1234 - val loss: 0.2345`.
pub fn format_epoch_report(summary: &EpochSummary, total_epochs: usize) -> String {
    match summary.val_loss {
        Some(val_loss) => format!(
            "Epoch {}/{}, loss: {:.4} - val loss: {:.4}",
            summary.epoch, total_epochs, summary.loss, val_loss
        ),
        None => format!(
            "Epoch {}/{}, loss: {:.4}",
            summary.epoch, total_epochs, summary.loss
        ),
    }
}
