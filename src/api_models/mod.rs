pub mod records;

#[allow(unused_imports)]
pub use records::{
    CandidateView, CapitalFlowEntry, RecordCategory, RecordView, RecordsQuery, RecordsResponse,
    RefreshQuery, RefreshResponse,
};
