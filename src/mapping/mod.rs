// pertmap/src/mapping/mod.rs

pub use region::{decide_map_region, MapRegion, MapRegionError};
pub use shellscript::{
    all_map_file_name, all_map_script, write_all_map_shellscript, AllMapShellscript,
    GridShellscript, MapShellscript, PerturbationMapShellscript,
};

pub mod region;
pub mod shellscript;
