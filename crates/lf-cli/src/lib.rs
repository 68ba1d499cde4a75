//! Plumbing around the fusion core: numbered PNG frame directories in and
//! out, the directory-level fuse run with its abort/skip policy, side-by-side
//! comparison frames, JSON reports.

pub mod compare;
pub mod frame_io;
pub mod fuse;
