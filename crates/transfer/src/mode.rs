use std::fmt;

/// Shipping strategy between the asteroid and a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferMode {
    /// Hohmann-like minimum-energy transfer.
    Efficient,
    /// Penalised direct transfer: more delta-V, less time.
    Fast,
    /// Rendezvous with a pre-established cycler loop.
    Cycler,
}

impl TransferMode {
    pub const ALL: [TransferMode; 3] = [
        TransferMode::Efficient,
        TransferMode::Fast,
        TransferMode::Cycler,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TransferMode::Efficient => "efficient",
            TransferMode::Fast => "fast",
            TransferMode::Cycler => "cycler",
        }
    }
}

impl fmt::Display for TransferMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
