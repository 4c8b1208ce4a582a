mod fixture;
mod json;
mod mock_hub;

pub use fixture::MockFixture;
pub use json::{json_subset, merge_json};
pub use mock_hub::{MockHub, MockHubError, MockVendor};
