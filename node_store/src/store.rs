//! The hierarchical node store
//!
//! Folders and files live in two flat vectors in creation order. Every
//! query is a linear filter over them.

use crate::node::{is_image_mime, File, Folder, NodeRef, RawFile};
use crate::thumbnail::{ThumbnailRef, ThumbnailRegistry, ThumbnailSource};
use core_types::{NodeId, Timestamp};
use std::collections::HashSet;
use thiserror::Error;

/// Errors reported by the node store
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Folder name is empty or whitespace only
    #[error("Folder name is blank")]
    BlankFolderName,

    /// No folder with this id exists
    #[error("Unknown folder: {0}")]
    UnknownFolder(NodeId),
}

/// Folders and files directly inside one folder, in creation order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleContents<'a> {
    /// Child folders
    pub folders: Vec<&'a Folder>,
    /// Child files
    pub files: Vec<&'a File>,
}

impl VisibleContents<'_> {
    /// Returns true if the folder has no children
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty()
    }

    /// Total number of children
    pub fn len(&self) -> usize {
        self.folders.len() + self.files.len()
    }
}

/// In-memory store of folders and files
///
/// Nodes are only ever appended. Parent references are checked on insert, so
/// every folder's parent exists and the hierarchy is acyclic by construction.
#[derive(Debug, Default)]
pub struct NodeStore {
    folders: Vec<Folder>,
    files: Vec<File>,
    ids: HashSet<NodeId>,
    thumbnails: ThumbnailRegistry,
}

impl NodeStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a folder inside `parent` (`None` for root)
    ///
    /// A name that trims to nothing is rejected with
    /// [`StoreError::BlankFolderName`] and leaves the store unchanged. The
    /// name is otherwise kept as supplied.
    pub fn create_folder(
        &mut self,
        name: &str,
        parent: Option<NodeId>,
        now: Timestamp,
    ) -> Result<&Folder, StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::BlankFolderName);
        }
        self.check_folder(parent)?;

        let id = self.mint_id(now);
        self.folders.push(Folder {
            id,
            name: name.to_string(),
            parent_id: parent,
            created_at: now,
        });
        Ok(&self.folders[self.folders.len() - 1])
    }

    /// Adds uploaded files to `folder` (`None` for root)
    ///
    /// Returns the new file nodes in input order. Image files get a live
    /// thumbnail handle backed by their content.
    pub fn add_files(
        &mut self,
        files: Vec<RawFile>,
        folder: Option<NodeId>,
        now: Timestamp,
    ) -> Result<&[File], StoreError> {
        self.check_folder(folder)?;

        let start = self.files.len();
        for raw in files {
            let mime_type = raw.effective_mime_type();
            let RawFile { name, bytes, .. } = raw;
            let size = bytes.len();
            let thumbnail = is_image_mime(&mime_type)
                .then(|| self.thumbnails.create(mime_type.as_str(), bytes));
            let id = self.mint_id(now);
            self.files.push(File {
                id,
                name,
                mime_type,
                size,
                folder_id: folder,
                uploaded_at: now,
                thumbnail,
            });
        }
        Ok(&self.files[start..])
    }

    /// Lists the folders and files directly inside `folder` (`None` for root)
    pub fn list_visible(&self, folder: Option<NodeId>) -> VisibleContents<'_> {
        VisibleContents {
            folders: self
                .folders
                .iter()
                .filter(|f| f.parent_id == folder)
                .collect(),
            files: self.files.iter().filter(|f| f.folder_id == folder).collect(),
        }
    }

    /// Looks up a folder by id
    pub fn folder(&self, id: NodeId) -> Option<&Folder> {
        self.folders.iter().find(|f| f.id == id)
    }

    /// Looks up a file by id
    pub fn file(&self, id: NodeId) -> Option<&File> {
        self.files.iter().find(|f| f.id == id)
    }

    /// Looks up any node by id
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.folder(id)
            .map(NodeRef::Folder)
            .or_else(|| self.file(id).map(NodeRef::File))
    }

    /// Returns the folders from the root down to and including `id`
    pub fn path_to(&self, id: NodeId) -> Result<Vec<&Folder>, StoreError> {
        let mut path = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let folder = self
                .folder(current)
                .ok_or(StoreError::UnknownFolder(current))?;
            path.push(folder);
            cursor = folder.parent_id;
        }
        path.reverse();
        Ok(path)
    }

    /// All folders in creation order
    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    /// All files in creation order
    pub fn files(&self) -> &[File] {
        &self.files
    }

    /// Number of folders
    pub fn folder_count(&self) -> usize {
        self.folders.len()
    }

    /// Number of files
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Resolves a thumbnail handle, if still live
    pub fn thumbnail(&self, handle: &ThumbnailRef) -> Option<&ThumbnailSource> {
        self.thumbnails.resolve(handle)
    }

    /// Number of live thumbnail handles
    pub fn live_thumbnails(&self) -> usize {
        self.thumbnails.live_count()
    }

    /// Releases every thumbnail handle; returns how many were live
    pub fn release_thumbnails(&mut self) -> usize {
        self.thumbnails.release_all()
    }

    fn check_folder(&self, folder: Option<NodeId>) -> Result<(), StoreError> {
        match folder {
            Some(id) if self.folder(id).is_none() => Err(StoreError::UnknownFolder(id)),
            _ => Ok(()),
        }
    }

    fn mint_id(&mut self, now: Timestamp) -> NodeId {
        let mut id = NodeId::new(now);
        while !self.ids.insert(id) {
            id = id.redraw();
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> Timestamp {
        Timestamp::from_millis(1_700_000_000_000)
    }

    fn names(contents: &VisibleContents<'_>) -> (Vec<String>, Vec<String>) {
        (
            contents.folders.iter().map(|f| f.name.clone()).collect(),
            contents.files.iter().map(|f| f.name.clone()).collect(),
        )
    }

    #[test]
    fn test_create_folder_at_root() {
        let mut store = NodeStore::new();
        let folder = store.create_folder("Docs", None, now()).unwrap();

        assert_eq!(folder.name, "Docs");
        assert_eq!(folder.parent_id, None);
        assert_eq!(store.folder_count(), 1);
    }

    #[test]
    fn test_blank_folder_names_are_rejected() {
        let mut store = NodeStore::new();

        assert_eq!(
            store.create_folder("", None, now()),
            Err(StoreError::BlankFolderName)
        );
        assert_eq!(
            store.create_folder("   \t", None, now()),
            Err(StoreError::BlankFolderName)
        );
        assert_eq!(store.folder_count(), 0);
    }

    #[test]
    fn test_folder_name_kept_as_supplied() {
        let mut store = NodeStore::new();
        let folder = store.create_folder("  padded ", None, now()).unwrap();
        assert_eq!(folder.name, "  padded ");
    }

    #[test]
    fn test_create_folder_under_unknown_parent() {
        let mut store = NodeStore::new();
        let ghost = NodeId::from_parts(1, 1);

        assert_eq!(
            store.create_folder("Orphan", Some(ghost), now()),
            Err(StoreError::UnknownFolder(ghost))
        );
        assert_eq!(store.folder_count(), 0);
    }

    #[test]
    fn test_list_visible_filters_by_parent_in_creation_order() {
        let mut store = NodeStore::new();
        let docs = store.create_folder("Docs", None, now()).unwrap().id;
        store.create_folder("Music", None, now()).unwrap();
        store.create_folder("2024", Some(docs), now()).unwrap();
        store.create_folder("2023", Some(docs), now()).unwrap();

        let (root_folders, root_files) = names(&store.list_visible(None));
        assert_eq!(root_folders, vec!["Docs", "Music"]);
        assert!(root_files.is_empty());

        let (docs_folders, _) = names(&store.list_visible(Some(docs)));
        assert_eq!(docs_folders, vec!["2024", "2023"]);
    }

    #[test]
    fn test_list_visible_is_stable_without_mutation() {
        let mut store = NodeStore::new();
        store.create_folder("A", None, now()).unwrap();
        store
            .add_files(vec![RawFile::new("a.txt", "text/plain", b"a".to_vec())], None, now())
            .unwrap();

        assert_eq!(store.list_visible(None), store.list_visible(None));
    }

    #[test]
    fn test_add_files_preserves_order_and_thumbnails_images_only() {
        let mut store = NodeStore::new();
        let added = store
            .add_files(
                vec![
                    RawFile::new("f1.png", "image/png", vec![0x89, 0x50]),
                    RawFile::new("f2.txt", "text/plain", b"hello".to_vec()),
                ],
                None,
                now(),
            )
            .unwrap();

        assert_eq!(added.len(), 2);
        assert_eq!(added[0].name, "f1.png");
        assert!(added[0].thumbnail.is_some());
        assert_eq!(added[1].name, "f2.txt");
        assert!(added[1].thumbnail.is_none());
        assert_eq!(added[1].size, 5);
        assert_eq!(added[0].uploaded_at, now());
        assert_eq!(store.live_thumbnails(), 1);
    }

    #[test]
    fn test_image_content_backs_its_thumbnail() {
        let mut store = NodeStore::new();
        let added = store
            .add_files(
                vec![RawFile::new("cat.jpg", "image/jpeg", vec![0xff, 0xd8, 0xff])],
                None,
                now(),
            )
            .unwrap();
        let (size, handle) = (added[0].size, added[0].thumbnail.unwrap());

        let source = store.thumbnail(&handle).unwrap();
        assert_eq!(size, 3);
        assert_eq!(source.mime_type, "image/jpeg");
        assert_eq!(&source.bytes[..], &[0xff, 0xd8, 0xff]);
    }

    #[test]
    fn test_add_files_into_folder() {
        let mut store = NodeStore::new();
        let docs = store.create_folder("Docs", None, now()).unwrap().id;
        store
            .add_files(vec![RawFile::new("cv.pdf", "", Vec::new())], Some(docs), now())
            .unwrap();

        assert!(store.list_visible(None).files.is_empty());
        let inside = store.list_visible(Some(docs));
        assert_eq!(inside.files.len(), 1);
        assert_eq!(inside.files[0].mime_type, "application/pdf");
    }

    #[test]
    fn test_add_files_to_unknown_folder() {
        let mut store = NodeStore::new();
        let ghost = NodeId::from_parts(9, 9);
        let result = store.add_files(
            vec![RawFile::new("a", "text/plain", Vec::new())],
            Some(ghost),
            now(),
        );

        assert_eq!(result, Err(StoreError::UnknownFolder(ghost)));
        assert_eq!(store.file_count(), 0);
    }

    #[test]
    fn test_ids_unique_across_folders_and_files() {
        let mut store = NodeStore::new();
        let mut seen = HashSet::new();
        for i in 0..50 {
            let id = store.create_folder(&format!("f{}", i), None, now()).unwrap().id;
            assert!(seen.insert(id));
        }
        let files: Vec<RawFile> = (0..50)
            .map(|i| RawFile::new(format!("{}.txt", i), "text/plain", Vec::new()))
            .collect();
        for file in store.add_files(files, None, now()).unwrap() {
            assert!(seen.insert(file.id));
        }
    }

    #[test]
    fn test_get_by_id() {
        let mut store = NodeStore::new();
        let folder = store.create_folder("Docs", None, now()).unwrap().id;
        let file = store
            .add_files(vec![RawFile::new("a.txt", "text/plain", Vec::new())], None, now())
            .unwrap()[0]
            .id;

        assert!(matches!(store.get(folder), Some(NodeRef::Folder(_))));
        assert!(matches!(store.get(file), Some(NodeRef::File(_))));
        assert!(store.get(NodeId::from_parts(0, 0)).is_none());
    }

    #[test]
    fn test_path_to_reconstructs_ancestry() {
        let mut store = NodeStore::new();
        let a = store.create_folder("a", None, now()).unwrap().id;
        let b = store.create_folder("b", Some(a), now()).unwrap().id;
        let c = store.create_folder("c", Some(b), now()).unwrap().id;

        let path: Vec<&str> = store
            .path_to(c)
            .unwrap()
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(path, vec!["a", "b", "c"]);

        let ghost = NodeId::from_parts(3, 3);
        assert_eq!(store.path_to(ghost), Err(StoreError::UnknownFolder(ghost)));
    }

    #[test]
    fn test_release_thumbnails() {
        let mut store = NodeStore::new();
        let handle = store
            .add_files(vec![RawFile::new("cat.gif", "image/gif", vec![7])], None, now())
            .unwrap()[0]
            .thumbnail
            .unwrap();

        assert_eq!(store.thumbnail(&handle).map(|s| s.bytes.len()), Some(1));
        assert_eq!(store.release_thumbnails(), 1);
        assert!(store.thumbnail(&handle).is_none());
        assert_eq!(store.live_thumbnails(), 0);
    }
}
