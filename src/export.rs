//! The export run.
//!
//! [`export`] drives one run over one or more libraries:
//!
//! ```text
//! check libraries → create output root → copy site assets
//!   for each library:  open → sequence events
//!     for each event:  claim folder → create folders
//!       for each photo: filename → materialize → faces → records
//! write manifest
//! ```
//!
//! All state that must be consistent across libraries lives in one
//! [`ExportRun`]: folder claims, the face index, the ID counters and the
//! accumulated manifest records. A run can be seeded with starting state.
//!
//! ## Output policy
//!
//! `export` refuses an output root that already exists. Names are only
//! unique within a run, so merging into a tree written by an earlier run
//! could hand an existing folder to a different event.

use crate::cache::CatalogCache;
use crate::catalog::{CatalogError, Library};
use crate::faces::FaceIndex;
use crate::imaging::MediaTool;
use crate::manifest::{EventRecord, ManifestError, PhotoRecord, write_manifest};
use crate::materialize::{
    ArtifactStatus, MaterializeError, MaterializeOptions, MaterializeOutcome, Materializer,
    PhotoJob,
};
use crate::metadata::TitleFilter;
use crate::naming::{FolderClaims, THUMBNAIL_DIR, THUMBNAIL_PREFIX, photo_filename, sequence_width};
use crate::sequence::{DateRange, IdCounters, sequence_library};
use crate::site::{SiteError, copy_site};
use crate::timestamp::{Normalizer, friendly_date, iso_date};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use tracing::{debug, info};

/// Directory below the output root that holds the exported photos.
pub const PHOTOS_DIR: &str = "photos";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Output directory already exists: {0}")]
    OutputExists(PathBuf),
    #[error("Could not create directory {}: {error}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Materialize(#[from] MaterializeError),
    #[error("Could not write manifest: {0}")]
    Manifest(#[from] ManifestError),
    #[error(transparent)]
    Site(#[from] SiteError),
}

/// Progress reported while exporting.
#[derive(Debug, Clone)]
pub enum ExportEvent {
    LibraryOpened {
        path: PathBuf,
        events: usize,
    },
    EventStarted {
        id: u64,
        folder: String,
        photo_count: usize,
    },
    PhotoExported {
        seq: usize,
        title: String,
        filename: String,
        outcome: MaterializeOutcome,
    },
    ManifestWritten {
        path: PathBuf,
    },
}

/// Totals for a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub libraries: usize,
    pub events: usize,
    pub photos: usize,
    pub faces: usize,
    /// Originals and thumbnails written in this run.
    pub created: usize,
    /// Originals and thumbnails already present.
    pub existing: usize,
    /// Originals and thumbnails that failed or are incomplete.
    pub failed: usize,
    pub assets: usize,
}

impl ExportSummary {
    fn count(&mut self, status: ArtifactStatus) {
        match status {
            ArtifactStatus::Created => self.created += 1,
            ArtifactStatus::Existing => self.existing += 1,
            ArtifactStatus::Incomplete | ArtifactStatus::Failed => self.failed += 1,
        }
    }
}

/// Everything an export needs besides the libraries and the tool.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub output: PathBuf,
    /// Site template copied into the output root.
    pub site: Option<PathBuf>,
    /// Manifest location relative to the output root.
    pub manifest_path: PathBuf,
    pub range: DateRange,
    pub titles: TitleFilter,
    pub normalizer: Normalizer,
    pub materialize: MaterializeOptions,
}

impl ExportOptions {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            site: None,
            manifest_path: PathBuf::from("inc/data.js"),
            range: DateRange::default(),
            titles: TitleFilter::default(),
            normalizer: Normalizer::capture(),
            materialize: MaterializeOptions::default(),
        }
    }

    pub fn photos_root(&self) -> PathBuf {
        self.output.join(PHOTOS_DIR)
    }
}

/// State of one export run.
pub struct ExportRun<T: MediaTool> {
    photos_root: PathBuf,
    materializer: Materializer<T>,
    titles: TitleFilter,
    normalizer: Normalizer,
    range: DateRange,
    claims: FolderClaims,
    faces: FaceIndex,
    ids: IdCounters,
    events: Vec<EventRecord>,
    photos: Vec<PhotoRecord>,
    summary: ExportSummary,
    progress: Option<Sender<ExportEvent>>,
}

impl<T: MediaTool> ExportRun<T> {
    pub fn new(options: &ExportOptions, tool: T) -> Self {
        Self {
            photos_root: options.photos_root(),
            materializer: Materializer::new(tool, options.materialize),
            titles: options.titles.clone(),
            normalizer: options.normalizer,
            range: options.range,
            claims: FolderClaims::new(),
            faces: FaceIndex::new(),
            ids: IdCounters::new(),
            events: Vec::new(),
            photos: Vec::new(),
            summary: ExportSummary::default(),
            progress: None,
        }
    }

    pub fn with_claims(mut self, claims: FolderClaims) -> Self {
        self.claims = claims;
        self
    }

    pub fn with_faces(mut self, faces: FaceIndex) -> Self {
        self.faces = faces;
        self
    }

    pub fn with_ids(mut self, ids: IdCounters) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_progress(mut self, progress: Option<Sender<ExportEvent>>) -> Self {
        self.progress = progress;
        self
    }

    pub fn claims(&self) -> &FolderClaims {
        &self.claims
    }

    pub fn faces(&self) -> &FaceIndex {
        &self.faces
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn photos(&self) -> &[PhotoRecord] {
        &self.photos
    }

    pub fn tool(&self) -> &T {
        self.materializer.tool()
    }

    fn emit(&self, event: ExportEvent) {
        if let Some(tx) = &self.progress {
            tx.send(event).ok();
        }
    }

    /// Export every selected event of `library`.
    pub fn add_library(&mut self, library: &Library) -> Result<(), ExportError> {
        let planned = sequence_library(
            library,
            &self.titles,
            &self.normalizer,
            &self.range,
            &mut self.ids,
        );
        info!(library = %library.root().display(), events = planned.len(), "library sequenced");
        self.emit(ExportEvent::LibraryOpened {
            path: library.root().to_path_buf(),
            events: planned.len(),
        });
        self.summary.libraries += 1;

        for event in planned {
            let folder = self.claims.claim(event.date, &event.title);
            let event_dir = folder.event_dir(&self.photos_root);
            let thumb_dir = folder.thumbnail_dir(&self.photos_root);
            create_dir(&event_dir)?;
            create_dir(&thumb_dir)?;
            debug!(event = event.id, folder = %folder.name, "claimed folder");
            self.emit(ExportEvent::EventStarted {
                id: event.id,
                folder: folder.name.clone(),
                photo_count: event.photos.len(),
            });

            let width = sequence_width(event.photos_before as usize);
            let mut photo_ids = Vec::with_capacity(event.photos.len());
            for planned in &event.photos {
                let photo = planned.photo;
                let source = photo.original_path();
                let extension = source.extension().map(|e| e.to_string_lossy());
                let filename = photo_filename(
                    planned.captured,
                    planned.seq,
                    width,
                    &planned.title,
                    extension.as_deref(),
                );
                let destination = event_dir.join(&filename);
                let thumbnail = thumb_dir.join(format!("{THUMBNAIL_PREFIX}{filename}"));

                let outcome = self.materializer.materialize(&PhotoJob {
                    source: &source,
                    destination: &destination,
                    thumbnail: &thumbnail,
                    modified: self.normalizer.to_utc(planned.captured),
                })?;
                self.summary.count(outcome.original);
                self.summary.count(outcome.thumbnail);

                let faces = self.faces.record_photo(
                    planned.id,
                    &photo.faces(),
                    photo.caption(),
                    planned.captured,
                );
                let date = planned.captured.date();
                self.photos.push(PhotoRecord {
                    id: planned.id,
                    path: folder.photo_path(&filename),
                    thumb_path: folder.thumbnail_path(&filename),
                    event_id: event.id,
                    title: planned.title.clone(),
                    description: photo.description().trim().to_string(),
                    faces,
                    date: iso_date(date),
                    date_friendly: friendly_date(date),
                });
                photo_ids.push(planned.id);

                self.emit(ExportEvent::PhotoExported {
                    seq: planned.seq,
                    title: planned.title.clone(),
                    filename,
                    outcome,
                });
            }

            self.summary.photos += photo_ids.len();
            self.summary.events += 1;
            self.events.push(EventRecord {
                id: event.id,
                title: event.title,
                date: iso_date(event.date),
                date_friendly: friendly_date(event.date),
                photos: photo_ids,
            });
        }
        Ok(())
    }

    /// Write the manifest and return the run's totals.
    pub fn finish(mut self, manifest_path: &Path) -> Result<ExportSummary, ExportError> {
        write_manifest(manifest_path, &self.events, &self.photos, &self.faces)?;
        self.summary.faces = self.faces.len();
        info!(path = %manifest_path.display(), "manifest written");
        self.emit(ExportEvent::ManifestWritten {
            path: manifest_path.to_path_buf(),
        });
        Ok(self.summary)
    }
}

fn create_dir(path: &Path) -> Result<(), ExportError> {
    fs::create_dir_all(path).map_err(|error| ExportError::CreateDir {
        path: path.to_path_buf(),
        error,
    })
}

/// Export `libraries` into a new output root.
pub fn export<T: MediaTool>(
    libraries: &[PathBuf],
    options: &ExportOptions,
    tool: T,
    cache: &dyn CatalogCache,
    progress: Option<Sender<ExportEvent>>,
) -> Result<ExportSummary, ExportError> {
    for library in libraries {
        Library::check(library)?;
    }
    if options.output.exists() {
        return Err(ExportError::OutputExists(options.output.clone()));
    }
    create_dir(&options.output)?;
    create_dir(&options.photos_root().join(THUMBNAIL_DIR))?;

    let assets = match &options.site {
        Some(template) => copy_site(template, &options.output)?,
        None => 0,
    };

    let mut run = ExportRun::new(options, tool).with_progress(progress);
    for path in libraries {
        let library = Library::open(path, cache)?;
        run.add_library(&library)?;
    }
    let mut summary = run.finish(&options.output.join(&options.manifest_path))?;
    summary.assets = assets;
    Ok(summary)
}

/// Copy the site template into an existing (or new) output root without
/// touching the photo tree. Returns the number of files copied.
pub fn update_site(template: &Path, output: &Path) -> Result<usize, ExportError> {
    create_dir(output)?;
    Ok(copy_site(template, output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::NoCache;
    use crate::catalog::Coordinates;
    use crate::faces::{FaceEntry, FaceSighting};
    use crate::imaging::backend::tests::{MockTool, RecordedOp};
    use crate::manifest::read_manifest;
    use crate::test_helpers::{CatalogBuilder, write_album_data};
    use std::collections::{BTreeMap, HashSet};
    use tempfile::TempDir;

    const DAY: f64 = 86_400.0;

    fn options(output: &Path) -> ExportOptions {
        ExportOptions {
            normalizer: Normalizer::utc(),
            ..ExportOptions::new(output)
        }
    }

    /// A library whose originals exist under `dir/Masters`.
    fn library_with_files(dir: &Path, captions: &[(&str, f64)], events: &[(&str, &[&str])]) -> Library {
        let mut builder = CatalogBuilder::new().root(dir);
        for (i, (caption, offset)) in captions.iter().enumerate() {
            let path = dir.join("Masters").join(format!("IMG_{i}.jpg"));
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, caption.as_bytes()).unwrap();
            builder = builder.photo_file(&(i + 1).to_string(), caption, *offset, &path);
        }
        for (name, keys) in events {
            builder = builder.event(name, keys);
        }
        builder.build()
    }

    #[test]
    fn run_writes_tree_and_records() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("disc");
        let library = library_with_files(
            &tmp.path().join("lib"),
            &[("Pier", 2.0 * DAY + 3600.0), ("PD_0001", 2.0 * DAY)],
            &[("Trip/Lake", &["1", "2"])],
        );
        let opts = options(&out);
        let mut run = ExportRun::new(&opts, MockTool::new());

        run.add_library(&library).unwrap();

        let photos = run.photos();
        assert_eq!(photos.len(), 2);
        assert_eq!(photos[0].path, "2001-01-03 - Trip-Lake/2001-01-03 00-00-00 - 1.jpg");
        assert_eq!(
            photos[1].thumb_path,
            "thumbnails/2001-01-03 - Trip-Lake/thumb_2001-01-03 01-00-00 - 2 - Pier.jpg"
        );
        assert_eq!(photos[1].title, "Pier");
        assert_eq!(photos[0].event_id, 1);
        assert!(out.join("photos").join(&photos[0].path).is_file());
        assert!(out.join("photos").join(&photos[1].thumb_path).is_file());

        let events = run.events();
        assert_eq!(events[0].title, "Trip/Lake");
        assert_eq!(events[0].date, "2001-01-03");
        assert_eq!(events[0].date_friendly, "January 3, 2001");
        assert_eq!(events[0].photos, vec![1, 2]);
    }

    #[test]
    fn ids_and_folders_stay_unique_across_libraries() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("disc");
        let first = library_with_files(
            &tmp.path().join("a"),
            &[("x", 0.0), ("y", 10.0)],
            &[("Jan 1, 2001", &["1"]), ("", &["2"])],
        );
        let second = library_with_files(
            &tmp.path().join("b"),
            &[("z", 20.0)],
            &[("Scan 3", &["1"])],
        );
        let opts = options(&out);
        let mut run = ExportRun::new(&opts, MockTool::new());
        run.add_library(&first).unwrap();
        run.add_library(&second).unwrap();

        let ids: Vec<u64> = run.photos().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        let event_ids: Vec<u64> = run.events().iter().map(|e| e.id).collect();
        assert_eq!(event_ids, vec![1, 2, 3]);

        let folders: Vec<&str> = run
            .photos()
            .iter()
            .map(|p| p.path.split('/').next().unwrap())
            .collect();
        assert_eq!(folders, vec!["2001-01-01", "2001-01-01 - 02", "2001-01-01 - 03"]);
        let unique: HashSet<&&str> = folders.iter().collect();
        assert_eq!(unique.len(), 3);
        assert_eq!(run.claims().len(), 3);
    }

    #[test]
    fn sequence_width_follows_prior_photos() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("disc");
        let captions: Vec<(String, f64)> = (0..11).map(|i| (format!("p{i}"), i as f64)).collect();
        let caption_refs: Vec<(&str, f64)> = captions.iter().map(|(c, o)| (c.as_str(), *o)).collect();
        let first_keys: Vec<String> = (1..=10).map(|i| i.to_string()).collect();
        let first_refs: Vec<&str> = first_keys.iter().map(String::as_str).collect();
        let library = library_with_files(
            &tmp.path().join("lib"),
            &caption_refs,
            &[("Ten", first_refs.as_slice()), ("One", &["11"][..])],
        );
        let opts = options(&out);
        let mut run = ExportRun::new(&opts, MockTool::new());
        run.add_library(&library).unwrap();

        // First event: zero photos before it, so one digit even at seq 10.
        assert!(run.photos()[9].path.ends_with(" - 10 - p9.jpg"));
        // Second event: ten photos before it, so two digits.
        assert!(run.photos()[10].path.ends_with(" - 01 - p10.jpg"));
    }

    #[test]
    fn faces_are_indexed_across_libraries() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("disc");
        let rect = "{{0.1, 0.2}, {0.3, 0.4}}";
        let first = CatalogBuilder::new()
            .photo_with_faces("1", "a", 0.0, &[(1, rect), (2, rect)])
            .event("A", &["1"])
            .names(&[(1, "Alice"), (2, "Alice")])
            .build();
        let second = CatalogBuilder::new()
            .photo_with_faces("9", "b", DAY, &[(40, rect)])
            .event("B", &["9"])
            .names(&[(40, "Alice")])
            .build();
        let opts = options(&out);
        let mut run = ExportRun::new(&opts, MockTool::new());
        run.add_library(&first).unwrap();
        run.add_library(&second).unwrap();

        let alice = run.faces().get("Alice").unwrap();
        assert_eq!(alice.key, 1);
        assert_eq!(alice.photos.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(run.photos()[0].faces, vec!["Alice"]);
    }

    #[test]
    fn seeded_claims_push_names_along() {
        let tmp = TempDir::new().unwrap();
        let library = library_with_files(&tmp.path().join("lib"), &[("x", 0.0)], &[("", &["1"])]);
        let opts = options(&tmp.path().join("disc"));
        let mut run =
            ExportRun::new(&opts, MockTool::new()).with_claims(FolderClaims::seeded(["2001-01-01"]));
        run.add_library(&library).unwrap();
        assert!(run.photos()[0].path.starts_with("2001-01-01 - 02/"));
    }

    #[test]
    fn seeded_ids_and_faces_continue_from_prior_state() {
        let tmp = TempDir::new().unwrap();
        let rect = "{{0.1, 0.2}, {0.3, 0.4}}";
        let library = CatalogBuilder::new()
            .photo_with_faces("1", "a", 0.0, &[(9, rect)])
            .event("E", &["1"])
            .names(&[(9, "Alice")])
            .build();
        let mut seed = BTreeMap::new();
        seed.insert(
            "Alice".to_string(),
            FaceEntry {
                key: 1,
                photos: vec![FaceSighting {
                    id: 3,
                    coordinates: Coordinates::default(),
                }],
            },
        );
        let opts = options(&tmp.path().join("disc"));
        let mut run = ExportRun::new(&opts, MockTool::new())
            .with_ids(IdCounters {
                events: 5,
                photos: 40,
            })
            .with_faces(FaceIndex::seeded(seed));

        run.add_library(&library).unwrap();

        assert_eq!(run.events()[0].id, 6);
        assert_eq!(run.events()[0].photos, vec![41]);
        assert_eq!(run.photos()[0].id, 41);
        assert_eq!(run.photos()[0].event_id, 6);
        let alice = run.faces().get("Alice").unwrap();
        assert_eq!(alice.key, 1);
        assert_eq!(alice.photos.iter().map(|s| s.id).collect::<Vec<_>>(), vec![3, 41]);
    }

    #[test]
    fn strict_tool_failure_aborts_run() {
        let tmp = TempDir::new().unwrap();
        let library = library_with_files(&tmp.path().join("lib"), &[("x", 0.0)], &[("E", &["1"])]);
        let mut opts = options(&tmp.path().join("disc"));
        opts.materialize.strict = true;
        let mut run = ExportRun::new(&opts, MockTool::failing());
        let err = run.add_library(&library).unwrap_err();
        assert!(matches!(err, ExportError::Materialize(_)));
    }

    #[test]
    fn lenient_tool_failure_is_counted() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("disc");
        let library = library_with_files(&tmp.path().join("lib"), &[("x", 0.0)], &[("E", &["1"])]);
        let opts = options(&out);
        let mut run = ExportRun::new(&opts, MockTool::failing());
        run.add_library(&library).unwrap();
        let summary = run.finish(&out.join("inc/data.js")).unwrap();
        assert_eq!(summary.created, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.photos, 1);
    }

    #[test]
    fn progress_events_are_sent() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("disc");
        let library = library_with_files(&tmp.path().join("lib"), &[("x", 0.0)], &[("E", &["1"])]);
        let opts = options(&out);
        let (tx, rx) = std::sync::mpsc::channel();
        let mut run = ExportRun::new(&opts, MockTool::new()).with_progress(Some(tx));
        run.add_library(&library).unwrap();
        run.finish(&out.join("inc/data.js")).unwrap();

        let events: Vec<ExportEvent> = rx.iter().collect();
        assert!(matches!(events[0], ExportEvent::LibraryOpened { events: 1, .. }));
        assert!(matches!(events[1], ExportEvent::EventStarted { id: 1, photo_count: 1, .. }));
        assert!(matches!(events[2], ExportEvent::PhotoExported { seq: 1, .. }));
        assert!(matches!(events[3], ExportEvent::ManifestWritten { .. }));
    }

    #[test]
    fn export_refuses_existing_output() {
        let tmp = TempDir::new().unwrap();
        let lib = tmp.path().join("lib");
        write_album_data(&lib, &CatalogBuilder::new().data());
        let result = export(&[lib], &options(tmp.path()), MockTool::new(), &NoCache, None);
        assert!(matches!(result, Err(ExportError::OutputExists(_))));
    }

    #[test]
    fn export_checks_libraries_before_creating_output() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("disc");
        let result = export(
            &[tmp.path().join("not-a-library")],
            &options(&out),
            MockTool::new(),
            &NoCache,
            None,
        );
        assert!(matches!(
            result,
            Err(ExportError::Catalog(CatalogError::NotALibrary(_)))
        ));
        assert!(!out.exists());
    }

    #[test]
    fn export_end_to_end_with_site_and_manifest() {
        let tmp = TempDir::new().unwrap();
        let lib = tmp.path().join("lib");
        let original = lib.join("Masters/IMG_1.jpg");
        fs::create_dir_all(original.parent().unwrap()).unwrap();
        fs::write(&original, b"jpeg").unwrap();
        let data = CatalogBuilder::new()
            .photo_file("1", "Dock", 3600.0, &original)
            .comment("1", "  early swim ")
            .event("Lake", &["1"])
            .data();
        write_album_data(&lib, &data);
        let site = tmp.path().join("site");
        fs::create_dir_all(&site).unwrap();
        fs::write(site.join("index.html"), "<html>").unwrap();

        let out = tmp.path().join("disc");
        let mut opts = options(&out);
        opts.site = Some(site);
        let summary = export(&[lib], &opts, MockTool::new(), &NoCache, None).unwrap();

        assert_eq!(summary.libraries, 1);
        assert_eq!(summary.events, 1);
        assert_eq!(summary.photos, 1);
        assert_eq!(summary.assets, 1);
        assert!(out.join("index.html").is_file());
        assert!(out.join("photos/thumbnails").is_dir());

        let manifest = read_manifest(&out.join("inc/data.js")).unwrap();
        let photo = &manifest.photos[&1];
        assert_eq!(photo.path, "2001-01-01 - Lake/2001-01-01 01-00-00 - 1 - Dock.jpg");
        assert_eq!(photo.description, "early swim");
        assert_eq!(manifest.events[&1].photos, vec![1]);
    }

    #[test]
    fn thumbnails_are_made_from_the_source() {
        let tmp = TempDir::new().unwrap();
        let library = library_with_files(&tmp.path().join("lib"), &[("x", 0.0)], &[("E", &["1"])]);
        let opts = options(&tmp.path().join("disc"));
        let mut run = ExportRun::new(&opts, MockTool::new());
        run.add_library(&library).unwrap();

        let ops = run.tool().get_operations();
        let RecordedOp::Thumbnail { source, .. } = &ops[0] else {
            panic!("expected a thumbnail call, got {ops:?}");
        };
        assert!(source.ends_with("Masters/IMG_0.jpg"));
    }

    #[test]
    fn update_site_tolerates_existing_output() {
        let tmp = TempDir::new().unwrap();
        let site = tmp.path().join("site");
        fs::create_dir_all(&site).unwrap();
        fs::write(site.join("index.html"), "new").unwrap();
        let out = tmp.path().join("disc");
        fs::create_dir_all(out.join("photos")).unwrap();
        fs::write(out.join("index.html"), "old").unwrap();

        assert_eq!(update_site(&site, &out).unwrap(), 1);
        assert_eq!(fs::read_to_string(out.join("index.html")).unwrap(), "new");
        assert!(out.join("photos").is_dir());
    }
}
