use agora_api::{ClaimId, CommentId, CommentRecord, Snapshot, Time, UserId, Vote, VoteCounts};
use chrono::{Duration, Utc};
use rand::{seq::SliceRandom, Rng};
use uuid::Uuid;

const NUM_USERS: usize = 8;
const NUM_BLOCKED: usize = 1;

const NUM_TOP_LEVEL: usize = 20;
const NUM_REPLIES: usize = 120;
const FOR_PROBABILITY: f64 = 0.55;
const IMAGE_PROBABILITY: f64 = 0.1;

const MIN_WORD_COUNT: usize = 5;
const MAX_WORD_COUNT: usize = 40;

// Damage the hosted store has been seen to hand out
const NUM_ORPHANS: usize = 5;
const NUM_CYCLES: usize = 1;

fn gen_id() -> CommentId {
    CommentId(Uuid::new_v4().to_string())
}

fn gen_text(rng: &mut impl Rng) -> String {
    lipsum::lipsum_words(rng.gen_range(MIN_WORD_COUNT..=MAX_WORD_COUNT))
}

fn gen_votes(rng: &mut impl Rng) -> (VoteCounts, Option<Vote>) {
    let votes = VoteCounts {
        upvotes: rng.gen_range(0..20),
        downvotes: rng.gen_range(0..10),
    };
    let my_vote = match rng.gen_range(0..3) {
        0 => Some(Vote::Up),
        1 => Some(Vote::Down),
        _ => None,
    };
    (votes, my_vote)
}

fn gen_comment(
    rng: &mut impl Rng,
    claim_id: ClaimId,
    author_id: UserId,
    parent_id: Option<CommentId>,
    created_at: Time,
) -> CommentRecord {
    let images = match rng.gen_bool(IMAGE_PROBABILITY) {
        true => vec![format!("https://images.example.com/{}.jpg", Uuid::new_v4())],
        false => Vec::new(),
    };
    let (votes, my_vote) = gen_votes(rng);
    CommentRecord {
        id: gen_id(),
        parent_id,
        stance: rng.gen_bool(FOR_PROBABILITY),
        created_at,
        claim_id,
        author_id,
        text: gen_text(rng),
        images,
        votes,
        my_vote,
    }
}

fn main() -> serde_json::Result<()> {
    let mut rng = rand::thread_rng();
    let claim_id = ClaimId(Uuid::new_v4());
    let start = Utc::now() - Duration::days(7);

    // Generate users, the first one being the viewer
    let users = (0..NUM_USERS)
        .map(|_| UserId(Uuid::new_v4()))
        .collect::<Vec<_>>();
    let viewer = users[0];
    let blocked = users[1..]
        .choose_multiple(&mut rng, NUM_BLOCKED)
        .copied()
        .collect::<Vec<_>>();

    // Generate top-level comments
    let mut comments = Vec::new();
    for _ in 0..NUM_TOP_LEVEL {
        let author = *users.choose(&mut rng).expect("there are users");
        let date = start + Duration::minutes(rng.gen_range(0..3 * 24 * 60));
        comments.push(gen_comment(&mut rng, claim_id, author, None, date));
    }

    // Generate replies, each to any already-generated comment
    for _ in 0..NUM_REPLIES {
        let author = *users.choose(&mut rng).expect("there are users");
        let parent = comments.choose(&mut rng).expect("there are top-level comments");
        let (parent_id, date) = (
            parent.id.clone(),
            parent.created_at + Duration::minutes(rng.gen_range(1..600)),
        );
        comments.push(gen_comment(&mut rng, claim_id, author, Some(parent_id), date));
    }

    // Generate replies to comments that were since deleted
    for _ in 0..NUM_ORPHANS {
        let author = *users.choose(&mut rng).expect("there are users");
        let date = start + Duration::minutes(rng.gen_range(0..7 * 24 * 60));
        comments.push(gen_comment(&mut rng, claim_id, author, Some(gen_id()), date));
    }

    // Generate pairs of comments replying to each other
    for _ in 0..NUM_CYCLES {
        let author = *users.choose(&mut rng).expect("there are users");
        let date = start + Duration::minutes(rng.gen_range(0..7 * 24 * 60));
        let (x, y) = (gen_id(), gen_id());
        let mut first = gen_comment(&mut rng, claim_id, author, Some(y.clone()), date);
        first.id = x.clone();
        let mut second = gen_comment(&mut rng, claim_id, author, Some(x), date);
        second.id = y;
        comments.push(first);
        comments.push(second);
    }

    comments.shuffle(&mut rng);
    let snapshot = Snapshot {
        claim_id,
        viewer,
        comments,
        blocked,
    };
    serde_json::to_writer_pretty(std::io::stdout().lock(), &snapshot)?;
    println!();
    Ok(())
}
