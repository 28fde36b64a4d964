pub mod jsonl;
pub mod labels;
pub mod lines;
pub mod nan;

pub use jsonl::{validate_file, validate_files, FileReport, IssueKind, LineIssue, ValidationSummary};
pub use labels::LabelDistribution;
pub use lines::{collect_files, count_lines};
pub use nan::{find_non_finite, NonFiniteToken};
