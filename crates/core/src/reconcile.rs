//! Pure planning for the blob-storage reconciliation job.
//!
//! The worker lists every object in the bucket, then this module decides
//! what to do: which objects are videos, which are candidate thumbnails,
//! and which videos are orphans (no catalog row for their key). The I/O
//! loop in `bom-worker` only executes the plan, so convergence and
//! partitioning are unit-testable without a bucket or database.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// File suffixes treated as video masters.
pub const VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".mov", ".mkv", ".avi", ".webm"];

/// File suffixes treated as thumbnail candidates.
pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".webp"];

/// Maximum number of orphan keys echoed back in a [`SyncReport`].
pub const ORPHAN_SAMPLE_LIMIT: usize = 10;

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

/// One object from the blob-storage listing.
#[derive(Debug, Clone)]
pub struct BlobObject {
    pub key: String,
    pub size: i64,
    pub last_modified: Option<Timestamp>,
}

/// The work a sync run has to do, derived from one full listing.
#[derive(Debug)]
pub struct SyncPlan {
    /// Total object count in the listing, videos and otherwise.
    pub total_in_storage: usize,
    /// All video objects, catalogued or not.
    pub video_files: Vec<BlobObject>,
    /// Video objects with no catalog row for their key.
    pub orphans: Vec<BlobObject>,
    /// `base name -> thumbnail URL` index built from image objects.
    pub thumbnails: HashMap<String, String>,
}

/// Aggregate counters returned by a sync run.
#[derive(Debug, Default, Serialize)]
pub struct SyncReport {
    pub total_in_storage: usize,
    pub video_files: usize,
    pub new_synced: usize,
    pub updated_thumbnails: usize,
    pub failed: usize,
    pub orphan_samples: Vec<String>,
}

// ---------------------------------------------------------------------------
// Classification helpers
// ---------------------------------------------------------------------------

fn has_suffix(key: &str, suffixes: &[&str]) -> bool {
    let lower = key.to_lowercase();
    suffixes.iter().any(|ext| lower.ends_with(ext))
}

/// Whether a storage key names a video master.
pub fn is_video_key(key: &str) -> bool {
    has_suffix(key, VIDEO_EXTENSIONS)
}

/// Whether a storage key names a thumbnail candidate.
pub fn is_image_key(key: &str) -> bool {
    has_suffix(key, IMAGE_EXTENSIONS)
}

/// A key without its final extension; thumbnails pair with videos by
/// sharing this base name.
pub fn base_name(key: &str) -> &str {
    match key.rfind('.') {
        Some(idx) if idx > 0 => &key[..idx],
        _ => key,
    }
}

/// The final path segment of a storage key.
pub fn file_name(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

/// Build a [`SyncPlan`] from a full listing and the set of blob keys
/// already present in the catalog.
///
/// Thumbnail URLs are prefixed with `public_base_url` when one is
/// configured; otherwise the raw key is stored and resolved at render
/// time. The orphan set is a plain set difference, which is what makes
/// repeated runs converge: once a key is catalogued it never reappears.
pub fn plan_sync(
    listing: Vec<BlobObject>,
    existing_keys: &HashSet<String>,
    public_base_url: Option<&str>,
) -> SyncPlan {
    let total_in_storage = listing.len();

    let mut video_files = Vec::new();
    let mut thumbnails = HashMap::new();

    for object in listing {
        if is_video_key(&object.key) {
            video_files.push(object);
        } else if is_image_key(&object.key) {
            let url = match public_base_url {
                Some(base) => format!("{}/{}", base.trim_end_matches('/'), object.key),
                None => object.key.clone(),
            };
            thumbnails.insert(base_name(&object.key).to_string(), url);
        }
    }

    let orphans = video_files
        .iter()
        .filter(|o| !existing_keys.contains(&o.key))
        .cloned()
        .collect();

    SyncPlan {
        total_in_storage,
        video_files,
        orphans,
        thumbnails,
    }
}

impl SyncPlan {
    /// Thumbnail URL for a video key, matched by shared base name.
    pub fn thumbnail_for(&self, video_key: &str) -> Option<&str> {
        self.thumbnails.get(base_name(video_key)).map(String::as_str)
    }

    /// The orphan keys echoed in reports, capped at [`ORPHAN_SAMPLE_LIMIT`].
    pub fn orphan_samples(&self) -> Vec<String> {
        self.orphans
            .iter()
            .take(ORPHAN_SAMPLE_LIMIT)
            .map(|o| o.key.clone())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn obj(key: &str) -> BlobObject {
        BlobObject {
            key: key.to_string(),
            size: 1024,
            last_modified: None,
        }
    }

    // -- classification ----------------------------------------------------

    #[test]
    fn video_keys_recognized_case_insensitively() {
        assert!(is_video_key("uploads/a.mp4"));
        assert!(is_video_key("uploads/b.MOV"));
        assert!(is_video_key("c.webm"));
        assert!(!is_video_key("uploads/a.jpg"));
        assert!(!is_video_key("uploads/mp4")); // no dot
    }

    #[test]
    fn image_keys_recognized() {
        assert!(is_image_key("thumbs/a.jpeg"));
        assert!(is_image_key("thumbs/b.PNG"));
        assert!(!is_image_key("thumbs/c.gif"));
    }

    #[test]
    fn base_name_strips_final_extension() {
        assert_eq!(base_name("uploads/video.mp4"), "uploads/video");
        assert_eq!(base_name("a.b.mp4"), "a.b");
        assert_eq!(base_name("noext"), "noext");
    }

    #[test]
    fn file_name_takes_last_segment() {
        assert_eq!(file_name("uploads/2026/a.mp4"), "a.mp4");
        assert_eq!(file_name("a.mp4"), "a.mp4");
    }

    // -- plan_sync ---------------------------------------------------------

    #[test]
    fn partitions_videos_and_thumbnails() {
        let listing = vec![
            obj("uploads/a.mp4"),
            obj("uploads/a.jpg"),
            obj("uploads/b.mov"),
            obj("notes.txt"),
        ];
        let plan = plan_sync(listing, &HashSet::new(), None);

        assert_eq!(plan.total_in_storage, 4);
        assert_eq!(plan.video_files.len(), 2);
        assert_eq!(plan.orphans.len(), 2);
        assert_eq!(plan.thumbnails.len(), 1);
        assert_eq!(plan.thumbnail_for("uploads/a.mp4"), Some("uploads/a.jpg"));
        assert_eq!(plan.thumbnail_for("uploads/b.mov"), None);
    }

    #[test]
    fn existing_keys_are_not_orphans() {
        let listing = vec![obj("uploads/a.mp4"), obj("uploads/b.mp4")];
        let existing: HashSet<String> = ["uploads/a.mp4".to_string()].into();
        let plan = plan_sync(listing, &existing, None);

        assert_eq!(plan.video_files.len(), 2);
        assert_eq!(plan.orphans.len(), 1);
        assert_eq!(plan.orphans[0].key, "uploads/b.mp4");
    }

    /// Running the planner again after the first run catalogued every
    /// orphan must produce an empty work list.
    #[test]
    fn second_run_over_unchanged_listing_converges() {
        let listing = vec![obj("a.mp4"), obj("b.mp4"), obj("b.jpg")];

        let first = plan_sync(listing.clone(), &HashSet::new(), None);
        assert_eq!(first.orphans.len(), 2);

        let catalogued: HashSet<String> =
            first.orphans.iter().map(|o| o.key.clone()).collect();
        let second = plan_sync(listing, &catalogued, None);
        assert!(second.orphans.is_empty());
        assert_eq!(second.video_files.len(), 2);
    }

    #[test]
    fn public_base_url_prefixes_thumbnails() {
        let listing = vec![obj("thumbs/a.jpg")];
        let plan = plan_sync(listing, &HashSet::new(), Some("https://cdn.example.com/"));
        assert_eq!(
            plan.thumbnails.get("thumbs/a").map(String::as_str),
            Some("https://cdn.example.com/thumbs/a.jpg")
        );
    }

    #[test]
    fn orphan_samples_are_capped() {
        let listing: Vec<BlobObject> =
            (0..ORPHAN_SAMPLE_LIMIT + 5).map(|i| obj(&format!("v{i}.mp4"))).collect();
        let plan = plan_sync(listing, &HashSet::new(), None);
        assert_eq!(plan.orphans.len(), ORPHAN_SAMPLE_LIMIT + 5);
        assert_eq!(plan.orphan_samples().len(), ORPHAN_SAMPLE_LIMIT);
    }
}
