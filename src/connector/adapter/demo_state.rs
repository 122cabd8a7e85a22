use rand::Rng;
use rand::SeedableRng;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::{Chunk, FileState, FileVersion, RepositoryState, Snapshot};

/// Chunk size the sync daemon cuts files into.
pub const DEMO_CHUNK_SIZE: u64 = 1024 * 1024;

const DEMO_REPOS: [(&str, &str, &str); 4] = [
    ("photos", "share", "/home/demo/Pictures"),
    ("debian-isos", "static", "/srv/mirror/debian"),
    ("music", "share", "/home/demo/Music"),
    ("scratch", "share", "/tmp/scratch"),
];

/// Builds a plausible tracked state for `--mock-backend`.
///
/// The last repository is left without files so the `no data` path is visible.
pub fn demo_snapshot(seed: u64) -> Snapshot {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let repos = DEMO_REPOS
        .iter()
        .enumerate()
        .map(|(index, (name, kind, root))| {
            let mut repo = RepositoryState::new(Uuid::new_v4().to_string(), *name, *kind, *root);
            if index + 1 == DEMO_REPOS.len() {
                return repo;
            }
            for file_index in 0..rng.gen_range(2..6) {
                let path = format!("{}-{:02}.bin", name, file_index);
                repo = repo.with_file(demo_file(&mut rng, &path));
            }
            repo
        })
        .collect();

    Snapshot::new(repos).with_message("demo data")
}

fn demo_file(rng: &mut impl Rng, path: &str) -> FileState {
    let mut file = FileState::named(path);
    let versions: u32 = rng.gen_range(1..3);
    for version in 0..versions {
        let is_latest = version + 1 == versions;
        let size = rng.gen_range(1..6) * DEMO_CHUNK_SIZE + rng.gen_range(0..DEMO_CHUNK_SIZE);
        let saved_ratio = if is_latest { rng.gen_range(0.0..1.0) } else { 1.0 };
        file = file.with_version(
            FileVersion::new(demo_chunks(rng, path, size, saved_ratio))
                .with_timestamp(1_700_000_000 + i64::from(version) * 3600),
        );
    }
    file
}

fn demo_chunks(rng: &mut impl Rng, path: &str, size: u64, saved_ratio: f64) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut offset = 0;
    while offset < size {
        let length = DEMO_CHUNK_SIZE.min(size - offset);
        let hash = Sha256::digest(format!("{path}:{offset}:{length}").as_bytes());
        let hex: String = hash.iter().map(|b| format!("{:02x}", b)).collect();
        chunks.push(Chunk::new(length, rng.gen_bool(saved_ratio)).with_hash("sha256", hex));
        offset += length;
    }
    chunks
}
