// Typed response contracts for the three structured model operations.
// Decoding fails closed: required keys must be present and non-null.

pub mod improved_cv;
pub mod job_match;
pub mod review;
pub mod score;

pub use improved_cv::ImprovedCv;
pub use job_match::JobMatchResult;
pub use review::ReviewResult;
pub use score::Score;
