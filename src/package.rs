//! Builds the installable `.oxt` extension archive.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

/// Default archive name, written next to the calculation script.
pub const DEFAULT_OUTPUT: &str = "CoolPropLibre.oxt";

const MANIFEST_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<manifest:manifest xmlns:manifest="urn:oasis:names:tc:opendocument:xmlns:manifest:1.0">
    <manifest:file-entry manifest:media-type="application/vnd.sun.star.basic-library"
                         manifest:full-path="CoolProp/"/>
</manifest:manifest>
"#;

const LIBRARY_XLB: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE library:library PUBLIC "-//OpenOffice.org//DTD OfficeDocument 1.0//EN" "library.dtd">
<library:library xmlns:library="http://openoffice.org/2000/library" library:name="CoolProp" library:readonly="false" library:passwordprotected="false">
 <library:element library:name="CoolProp"/>
</library:library>
"#;

const DIALOG_XLB: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE library:library PUBLIC "-//OpenOffice.org//DTD OfficeDocument 1.0//EN" "library.dtd">
<library:library xmlns:library="http://openoffice.org/2000/library" library:name="CoolProp" library:readonly="false" library:passwordprotected="false"/>
"#;

const MODULE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE script:module PUBLIC "-//OpenOffice.org//DTD OfficeDocument 1.0//EN" "module.dtd">
<script:module xmlns:script="http://openoffice.org/2000/script" script:name="CoolProp" script:language="StarBasic" script:moduleType="normal"/>
"#;

const DESCRIPTION_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<description xmlns="http://openoffice.org/extensions/description/2006"
             xmlns:dep="http://openoffice.org/extensions/description/2006"
             xmlns:xlink="http://www.w3.org/1999/xlink">
    <identifier value="org.coolprop.calc.addin"/>
    <version value="2.0.0"/>
    <display-name>
        <name lang="en">CoolProp Thermodynamic Properties</name>
    </display-name>
    <extension-description>
        <src lang="en" xlink:href="description-en.txt"/>
    </extension-description>
    <dependencies>
        <OpenOffice.org-minimal-version value="4.0" dep:name="OpenOffice.org 4.0"/>
    </dependencies>
</description>
"#;

const DESCRIPTION_TEXT: &str = "CoolProp Wrapper for LibreOffice Calc

This extension provides thermodynamic property calculations using the CoolProp library.

Functions available:
- CPROP, CPROP_E, CPROP_SI - Real fluid properties
- CPROPHA, CPROPHA_E, CPROPHA_SI - Humid air properties

Supports both SI units (K, Pa, J/kg) and engineering units (°C, bar, kJ/kg).

Requirements:
- CoolProp Python package must be installed in LibreOffice's Python environment
";

#[derive(Error, Debug)]
pub enum PackageError {
    #[error("{what} not found at {}", .path.display())]
    MissingInput { what: &'static str, path: PathBuf },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Inputs and destination of one packaging run.
#[derive(Debug, Clone)]
pub struct PackageSpec {
    /// The calculation script bundled under `Scripts/python/`.
    pub script: PathBuf,
    /// The scripting-library stub stored as `CoolProp/CoolProp.xba`.
    pub basic: PathBuf,
    pub output: PathBuf,
}

impl PackageSpec {
    /// Output defaults to [`DEFAULT_OUTPUT`] beside the script.
    pub fn new(script: impl Into<PathBuf>, basic: impl Into<PathBuf>) -> Self {
        let script = script.into();
        let output = script
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(DEFAULT_OUTPUT);
        Self {
            script,
            basic: basic.into(),
            output,
        }
    }

    pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }
}

/// Write the extension archive and return the entry names, in order.
pub fn build_extension(package: &PackageSpec) -> Result<Vec<String>, PackageError> {
    let script = read_input("calculation script", &package.script)?;
    let basic = read_input("Basic library stub", &package.basic)?;

    let script_name = package
        .script
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| PackageError::MissingInput {
            what: "calculation script file name",
            path: package.script.clone(),
        })?;

    let entries: [(String, &[u8]); 8] = [
        ("META-INF/manifest.xml".into(), MANIFEST_XML.as_bytes()),
        ("description.xml".into(), DESCRIPTION_XML.as_bytes()),
        ("description-en.txt".into(), DESCRIPTION_TEXT.as_bytes()),
        (format!("Scripts/python/{script_name}"), script.as_slice()),
        ("CoolProp/script.xlb".into(), LIBRARY_XLB.as_bytes()),
        ("CoolProp/dialog.xlb".into(), DIALOG_XLB.as_bytes()),
        ("CoolProp/CoolProp.xml".into(), MODULE_XML.as_bytes()),
        ("CoolProp/CoolProp.xba".into(), basic.as_slice()),
    ];

    if let Some(dir) = package.output.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|source| PackageError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    let file = File::create(&package.output).map_err(|source| PackageError::Io {
        path: package.output.clone(),
        source,
    })?;

    let mut zip = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut names = Vec::with_capacity(entries.len());
    for (name, data) in entries {
        zip.start_file(name.as_str(), options)?;
        zip.write_all(data).map_err(|source| PackageError::Io {
            path: package.output.clone(),
            source,
        })?;
        info!(entry = %name, bytes = data.len(), "added");
        names.push(name);
    }
    zip.finish()?;

    info!(path = %package.output.display(), "extension written");
    Ok(names)
}

fn read_input(what: &'static str, path: &Path) -> Result<Vec<u8>, PackageError> {
    if !path.is_file() {
        return Err(PackageError::MissingInput {
            what,
            path: path.to_path_buf(),
        });
    }
    fs::read(path).map_err(|source| PackageError::Io {
        path: path.to_path_buf(),
        source,
    })
}
