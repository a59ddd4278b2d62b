use zonewatch_core::{ClockParseError, LoadError, SchemaError, Side};

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum AnalysisError {
    #[display("invalid observation table schema")]
    #[from]
    Schema(#[error(source)] SchemaError),
    #[display("invalid clock value in filtered observations")]
    #[from]
    Clock(#[error(source)] ClockParseError),
    #[display("failed to load observations")]
    #[from]
    Load(#[error(source)] LoadError),
    #[display("no rounds found for {team} on side {side}")]
    NoRounds { team: String, side: Side },
    #[display("observations have not been processed yet")]
    NotProcessed,
}
