use chrono::{Datelike, Utc};

pub use uuid::{uuid, Uuid};
pub type Time = chrono::DateTime<Utc>;

pub const STUB_UUID: Uuid = uuid!("ffffffff-ffff-ffff-ffff-ffffffffffff");

mod claim;
pub use claim::ClaimId;

mod comment;
pub use comment::{CommentId, CommentRecord, Vote, VoteCounts};

mod error;
pub use error::Error;

mod order;
pub use order::{Order, OrderType, ThreadOrder};

mod snapshot;
pub use snapshot::Snapshot;

mod stance;
pub use stance::StanceCounts;

mod store;
pub use store::Store;

mod user;
pub use user::UserId;

// The `validate` functions mirror what the hosted store would refuse to
// persist. The tree builder never calls them: it accepts whatever snapshot
// it is handed.

pub fn validate_string(s: &str) -> Result<(), Error> {
    match s.contains('\0') {
        true => Err(Error::NullByteInString(String::from(s))),
        false => Ok(()),
    }
}

pub fn validate_time(t: &Time) -> Result<(), Error> {
    match (1..=9999).contains(&t.year()) {
        true => Ok(()),
        false => Err(Error::InvalidTime(*t)),
    }
}
