//! Command-line interface for batch pathfinding over PNG cost maps

use crate::algorithm::pathfinding::{Pathfinder, PathfindingAlgorithm, path_cost};
use crate::io::configuration::{
    DEFAULT_CHUNK_SIZE, DEFAULT_PATH_DEPTH, DEFAULT_SEED, DEFAULT_WALL_DENSITY, OUTPUT_SUFFIX,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::export_path_overlay;
use crate::io::map::{generate_cost_map, load_cost_map, save_cost_map};
use crate::io::progress::ProgressManager;
use crate::map::movement::{CostShading, shade_movement_costs};
use crate::math::geometry::Coordinate;
use crate::math::heuristic::Heuristic;
use crate::spatial::chunk::{BufferFlags, MeshRecorder};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Search algorithm selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmChoice {
    /// A* with the configured heuristic
    AStar,
    /// Unweighted breadth-first search
    BreadthFirst,
    /// Cost-ordered Dijkstra search
    Dijkstra,
}

impl From<AlgorithmChoice> for PathfindingAlgorithm {
    fn from(choice: AlgorithmChoice) -> Self {
        match choice {
            AlgorithmChoice::AStar => Self::AStar,
            AlgorithmChoice::BreadthFirst => Self::BreadthFirst,
            AlgorithmChoice::Dijkstra => Self::Dijkstra,
        }
    }
}

/// Parse a `x,y` coordinate argument
///
/// # Errors
///
/// Returns a message if the value is not two comma-separated integers.
pub fn parse_coordinate(value: &str) -> std::result::Result<Coordinate, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{value}`"))?;
    let x = x.trim().parse::<i32>().map_err(|e| format!("invalid x: {e}"))?;
    let y = y.trim().parse::<i32>().map_err(|e| format!("invalid y: {e}"))?;
    Ok(Coordinate::new(x, y))
}

#[derive(Parser)]
#[command(name = "tilegrid")]
#[command(
    author,
    version,
    about = "Find paths across PNG cost maps on a chunked tile grid"
)]
/// Command-line arguments for the pathfinding tool
pub struct Cli {
    /// Input PNG cost map or directory of maps; with `--generate`, the map to create
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Generate a random square map of this size at TARGET before processing
    #[arg(short, long, value_name = "SIZE")]
    pub generate: Option<usize>,

    /// Fraction of generated tiles that become walls
    #[arg(short, long, default_value_t = DEFAULT_WALL_DENSITY)]
    pub density: f64,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Search algorithm
    #[arg(short, long, value_enum, default_value_t = AlgorithmChoice::AStar)]
    pub algorithm: AlgorithmChoice,

    /// Use the legacy coordinate-sum heuristic for A*
    #[arg(short, long)]
    pub legacy_heuristic: bool,

    /// Source tile as `x,y` (defaults to the bottom-left tile)
    #[arg(long, value_parser = parse_coordinate)]
    pub source: Option<Coordinate>,

    /// Destination tile as `x,y` (defaults to the top-right tile)
    #[arg(long, value_parser = parse_coordinate)]
    pub destination: Option<Coordinate>,

    /// Tiles along each edge of a chunk
    #[arg(short, long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Pathfinder configured from the algorithm and heuristic flags
    pub fn pathfinder(&self) -> Pathfinder {
        let heuristic = if self.legacy_heuristic {
            Heuristic::LegacyCoordinateSum
        } else {
            Heuristic::Manhattan
        };
        Pathfinder::new(self.algorithm.into()).with_heuristic(heuristic)
    }
}

/// Result of processing one cost map
#[derive(Debug, Clone, PartialEq)]
pub struct MapReport {
    /// Overlay image written for the map
    pub output: PathBuf,
    /// Number of path points, if a path was found
    pub steps: Option<usize>,
    /// Accumulated movement cost of the path, if found
    pub cost: Option<u32>,
    /// Chunks uploaded by the initial flush
    pub chunks_uploaded: usize,
}

/// Orchestrates batch processing of PNG files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if map generation, target validation, or file
    /// processing fails
    pub fn process(&mut self) -> Result<Vec<MapReport>> {
        if let Some(size) = self.cli.generate {
            let map = generate_cost_map(size, self.cli.density, self.cli.seed)?;
            save_cost_map(&map, &self.cli.target)?;
            info!(path = %self.cli.target.display(), size, "random cost map written");
        }

        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        let mut reports = Vec::with_capacity(files.len());
        for (index, file) in files.iter().enumerate() {
            reports.push(self.process_file(file, index)?);
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(reports)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if !is_png(target) {
                return Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"must be a PNG image",
                ));
            }
            // A freshly generated map is always processed
            let forced = self.cli.generate.is_some();
            if forced || self.should_process_file(target) {
                Ok(vec![target.clone()])
            } else {
                Ok(vec![])
            }
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target)? {
                let path = entry?.path();
                if is_png(&path) && !is_output(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be a PNG file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            info!(path = %input_path.display(), "skipping map, output exists");
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<MapReport> {
        let start_time = Instant::now();
        let output_path = Self::get_output_path(input_path);

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path);
        }

        let map = load_cost_map(input_path)?;
        self.advance(index);

        let mut grid = map.build_grid(self.cli.chunk_size)?;
        shade_movement_costs(&mut grid, &CostShading::default());
        let mut recorder = MeshRecorder::new();
        let chunks_uploaded = grid.update(&mut recorder);
        debug!(
            chunks = chunks_uploaded,
            uv_uploads = recorder.count(BufferFlags::UVS),
            "initial grid upload"
        );
        self.advance(index);

        let source = self.cli.source.unwrap_or_default();
        let destination = self.cli.destination.unwrap_or_else(|| {
            Coordinate::new(map.columns() as i32 - 1, map.rows() as i32 - 1)
        });
        let path = self
            .cli
            .pathfinder()
            .calculate_path(&grid, source, destination, DEFAULT_PATH_DEPTH);
        self.advance(index);

        let route: Vec<Coordinate> = path
            .iter()
            .flat_map(|found| found.points().iter())
            .filter_map(|&point| grid.tile_at_position(point))
            .map(|tile| tile.coordinate())
            .collect();

        let (steps, cost) = match &path {
            Some(found) => {
                let cost = path_cost(&grid, found);
                info!(
                    map = %input_path.display(),
                    %source,
                    %destination,
                    steps = found.len(),
                    cost,
                    elapsed_ms = start_time.elapsed().as_millis() as u64,
                    "path found"
                );
                (Some(found.len()), Some(cost))
            }
            None => {
                warn!(
                    map = %input_path.display(),
                    %source,
                    %destination,
                    "no path between endpoints"
                );
                (None, None)
            }
        };

        export_path_overlay(&map, &route, [source, destination], &output_path)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index);
        }

        Ok(MapReport {
            output: output_path,
            steps,
            cost,
            chunks_uploaded,
        })
    }

    fn advance(&mut self, index: usize) {
        if let Some(ref mut pm) = self.progress_manager {
            pm.advance(index);
        }
    }

    /// Output path for a map: `<stem>_path.<ext>` beside the input
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let extension = input_path.extension().unwrap_or_default();
        let output_name = format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            OUTPUT_SUFFIX,
            extension.to_string_lossy()
        );

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}

fn is_png(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("png")
}

fn is_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}
