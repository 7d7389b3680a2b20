pub mod models;

pub use models::{
    AthleteIdentity, CheckpointType, PriorPerformance, ResultRecord, ResultStatus,
    TimingCheckpoint,
};
