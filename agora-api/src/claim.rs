use crate::STUB_UUID;

use uuid::Uuid;

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct ClaimId(pub Uuid);

impl ClaimId {
    pub fn stub() -> ClaimId {
        ClaimId(STUB_UUID)
    }
}
