// pertmap/src/mapping/shellscript.rs

use super::region::MapRegion;
use crate::percent::percent_list_file_name;
use crate::variable::VariableType;
use log::debug;
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// GMT scripts turning a percent list into one map per radius shell.
#[derive(Clone, Debug)]
pub struct PerturbationMapShellscript {
    variable: VariableType,
    radii: Vec<f64>,
    region: MapRegion,
    scale: f64,
    grid_interval: f64,
}

impl PerturbationMapShellscript {
    pub fn new(
        variable: VariableType,
        radii: &[f64],
        region: MapRegion,
        scale: f64,
        grid_interval: f64,
    ) -> Self {
        Self {
            variable,
            radii: radii.to_vec(),
            region,
            scale,
            grid_interval,
        }
    }

    fn root(&self) -> String {
        format!("{}Percent", self.variable)
    }

    pub fn grid_file_name(&self) -> String {
        format!("{}Grid.sh", self.root())
    }

    pub fn map_file_name(&self) -> String {
        format!("{}Map.sh", self.root())
    }

    fn radii_list(&self) -> String {
        self.radii
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The grid script, rendered through Display.
    pub fn grid(&self) -> GridShellscript<'_> {
        GridShellscript(self)
    }

    /// The map script, rendered through Display.
    pub fn map(&self) -> MapShellscript<'_> {
        MapShellscript(self)
    }

    pub fn grid_script(&self) -> String {
        self.grid().to_string()
    }

    pub fn map_script(&self) -> String {
        self.map().to_string()
    }

    /// Writes the grid and map scripts into `output_folder`.
    pub fn write(&self, output_folder: &Path) -> std::io::Result<Vec<PathBuf>> {
        let grid_path = output_folder.join(self.grid_file_name());
        write_text(&grid_path, &self.grid())?;
        let map_path = output_folder.join(self.map_file_name());
        write_text(&map_path, &self.map())?;
        debug!(
            "Wrote {} and {}",
            grid_path.display(),
            map_path.display()
        );
        Ok(vec![grid_path, map_path])
    }
}

/// Interpolates the percent list of every radius shell onto a grid.
pub struct GridShellscript<'a>(&'a PerturbationMapShellscript);

impl fmt::Display for GridShellscript<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let script = self.0;
        let root = script.root();
        writeln!(f, "#!/bin/sh")?;
        writeln!(f)?;
        writeln!(f, "# {} perturbation grids, one per radius", script.variable)?;
        writeln!(f, "region={}", script.region)?;
        writeln!(f, "interval={}", script.grid_interval)?;
        writeln!(f)?;
        writeln!(f, "for radius in {}", script.radii_list())?;
        writeln!(f, "do")?;
        writeln!(
            f,
            "    awk -v r=$radius '$3 == r {{print $2, $1, $4}}' {} > {}_${{radius}}.xyz",
            percent_list_file_name(script.variable),
            root
        )?;
        writeln!(
            f,
            "    gmt blockmean {root}_${{radius}}.xyz -R$region -I$interval > {root}_${{radius}}.bm.xyz",
            root = root
        )?;
        writeln!(
            f,
            "    gmt surface {root}_${{radius}}.bm.xyz -R$region -I$interval -T0.5 -G{root}_${{radius}}.grd",
            root = root
        )?;
        writeln!(f, "done")
    }
}

/// Draws one map per radius shell from the grids.
pub struct MapShellscript<'a>(&'a PerturbationMapShellscript);

impl fmt::Display for MapShellscript<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let script = self.0;
        let root = script.root();
        writeln!(f, "#!/bin/sh")?;
        writeln!(f)?;
        writeln!(f, "# {} perturbation maps, one per radius", script.variable)?;
        writeln!(f, "region={}", script.region)?;
        writeln!(f, "scale={}", script.scale)?;
        writeln!(f, "projection=Q{}/15c", script.region.center_longitude())?;
        writeln!(f)?;
        writeln!(
            f,
            "gmt makecpt -Cpolar -T-$scale/$scale -I -D > {}.cpt",
            root
        )?;
        writeln!(f)?;
        writeln!(f, "for radius in {}", script.radii_list())?;
        writeln!(f, "do")?;
        writeln!(f, "    gmt begin {}_${{radius}} pdf", root)?;
        writeln!(
            f,
            "        gmt basemap -R$region -J$projection -Baf -BWSne+t\"{} at ${{radius}} km\"",
            script.variable
        )?;
        writeln!(
            f,
            "        gmt grdimage {root}_${{radius}}.grd -C{root}.cpt",
            root = root
        )?;
        writeln!(f, "        gmt coast -Wthinnest -A1000")?;
        writeln!(
            f,
            "        gmt colorbar -C{}.cpt -Bxaf+l\"d{}/{} (%)\"",
            root, script.variable, script.variable
        )?;
        writeln!(f, "    gmt end")?;
        writeln!(f, "done")
    }
}

pub fn all_map_file_name(variable: VariableType) -> String {
    format!("{}PercentAllMap.sh", variable)
}

/// Runs the grid and map scripts of every model subfolder, then removes the
/// intermediate files.
pub struct AllMapShellscript<'a> {
    variable: VariableType,
    subfolders: &'a [String],
}

impl<'a> AllMapShellscript<'a> {
    pub fn new(variable: VariableType, subfolders: &'a [String]) -> Self {
        Self {
            variable,
            subfolders,
        }
    }
}

impl fmt::Display for AllMapShellscript<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let root = format!("{}Percent", self.variable);
        writeln!(f, "#!/bin/sh")?;
        writeln!(f)?;
        writeln!(f, "for dir in {}", self.subfolders.join(" "))?;
        writeln!(f, "do")?;
        writeln!(f, "    cd $dir")?;
        writeln!(f, "    sh {}Grid.sh", root)?;
        writeln!(f, "    wait")?;
        writeln!(f, "    sh {}Map.sh", root)?;
        writeln!(f, "    wait")?;
        writeln!(
            f,
            "    rm -f {root}_*.xyz {root}_*.grd {root}.cpt gmt.history gmt.conf",
            root = root
        )?;
        writeln!(f, "    cd ..")?;
        writeln!(f, "done")
    }
}

pub fn all_map_script(variable: VariableType, subfolders: &[String]) -> String {
    AllMapShellscript::new(variable, subfolders).to_string()
}

pub fn write_all_map_shellscript(
    variable: VariableType,
    subfolders: &[String],
    output_folder: &Path,
) -> std::io::Result<PathBuf> {
    let path = output_folder.join(all_map_file_name(variable));
    write_text(&path, &AllMapShellscript::new(variable, subfolders))?;
    debug!("Wrote {}", path.display());
    Ok(path)
}

fn write_text(path: &Path, script: &dyn fmt::Display) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    write!(file, "{}", script)?;
    Ok(())
}
