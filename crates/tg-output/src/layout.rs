//! Dataset directory layout.

use std::fs;
use std::path::{Path, PathBuf};

use tg_sim::TrajectoryPoint;

use crate::writer::TrajectoryWriter;
use crate::{CsvTrajectoryWriter, OutputResult};

/// Scenario a trajectory file belongs to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum RouteKind {
    /// Drive along the planned route.
    Normal,
    /// Drive with injected detours.
    OffRoute,
    /// Normal drive with GPS noise applied.
    Noisy,
}

impl RouteKind {
    pub const ALL: [RouteKind; 3] = [RouteKind::Normal, RouteKind::OffRoute, RouteKind::Noisy];

    /// Subdirectory name under the dataset root.
    pub fn dir_name(self) -> &'static str {
        match self {
            RouteKind::Normal   => "normal_route",
            RouteKind::OffRoute => "off_route",
            RouteKind::Noisy    => "noisy_route",
        }
    }
}

/// Root directory of a generated dataset.
#[derive(Clone, Debug)]
pub struct DatasetLayout {
    root: PathBuf,
}

impl DatasetLayout {
    /// Create `root` and one subdirectory per [`RouteKind`].
    pub fn create(root: &Path) -> OutputResult<Self> {
        for kind in RouteKind::ALL {
            fs::create_dir_all(root.join(kind.dir_name()))?;
        }
        Ok(Self { root: root.to_path_buf() })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<kind>/route_NNN.csv`, zero-padded to three digits.
    pub fn route_path(&self, kind: RouteKind, index: usize) -> PathBuf {
        self.root.join(kind.dir_name()).join(format!("route_{index:03}.csv"))
    }

    /// Write `points` to the file for `kind` and `index`, returning its path.
    pub fn write_route(
        &self,
        kind:   RouteKind,
        index:  usize,
        points: &[TrajectoryPoint],
    ) -> OutputResult<PathBuf> {
        let path = self.route_path(kind, index);
        let mut writer = CsvTrajectoryWriter::create(&path)?;
        writer.write_points(points)?;
        writer.finish()?;
        Ok(path)
    }
}
