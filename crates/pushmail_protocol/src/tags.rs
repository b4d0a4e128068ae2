//! Protocol tag tables.
//!
//! Tokens are grouped by WBXML codepage. Only the pages the client speaks
//! are listed; each module mirrors one page of the protocol schema.

use crate::wbxml::Tag;

/// FolderHierarchy codepage: the folder-sync schema.
pub mod folder_hierarchy {
    use super::Tag;

    /// Codepage number for FolderHierarchy.
    pub const PAGE: u8 = 0x07;

    const fn tag(token: u8) -> Tag {
        Tag { page: PAGE, token }
    }

    /// Human-readable folder name.
    pub const DISPLAY_NAME: Tag = tag(0x07);
    /// Server-assigned folder identifier.
    pub const SERVER_ID: Tag = tag(0x08);
    /// Identifier of the parent folder.
    pub const PARENT_ID: Tag = tag(0x09);
    /// Folder type code.
    pub const TYPE: Tag = tag(0x0A);
    /// Operation status code.
    pub const STATUS: Tag = tag(0x0C);
    /// Container for hierarchy changes.
    pub const CHANGES: Tag = tag(0x0E);
    /// A folder added since the last sync.
    pub const ADD: Tag = tag(0x0F);
    /// A folder removed since the last sync.
    pub const DELETE: Tag = tag(0x10);
    /// A folder renamed or moved since the last sync.
    pub const UPDATE: Tag = tag(0x11);
    /// The sync cursor token.
    pub const SYNC_KEY: Tag = tag(0x12);
    /// Root element of the FolderSync operation.
    pub const FOLDER_SYNC: Tag = tag(0x16);
    /// Number of changes in a Changes block.
    pub const COUNT: Tag = tag(0x17);
}

#[cfg(test)]
mod tests {
    use super::folder_hierarchy as fh;

    #[test]
    fn folder_hierarchy_tokens() {
        assert_eq!(fh::FOLDER_SYNC.page, 0x07);
        assert_eq!(fh::FOLDER_SYNC.token, 0x16);
        assert_eq!(fh::SYNC_KEY.token, 0x12);
        assert_eq!(fh::STATUS.token, 0x0C);
    }
}
