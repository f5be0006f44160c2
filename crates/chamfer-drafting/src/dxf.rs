//! DXF R12 export of a schematic.
//!
//! The file carries a `CONTINUOUS` and a `DASHED` linetype and one layer per
//! [`Layer`]. Entities draw with their layer's linetype and color.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::schematic::Schematic;
use crate::types::{Entity, Layer, Point2D};

impl Schematic {
    /// Export to a DXF file.
    pub fn export_dxf(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_dxf(&mut writer)?;
        writer.flush()
    }

    /// Write DXF R12 to a writer.
    pub fn write_dxf(&self, mut writer: impl Write) -> std::io::Result<()> {
        write_header(&mut writer)?;
        write_tables(&mut writer)?;

        writeln!(writer, "0")?;
        writeln!(writer, "SECTION")?;
        writeln!(writer, "2")?;
        writeln!(writer, "ENTITIES")?;
        for entity in &self.entities {
            write_entity(&mut writer, entity)?;
        }
        writeln!(writer, "0")?;
        writeln!(writer, "ENDSEC")?;

        writeln!(writer, "0")?;
        writeln!(writer, "EOF")?;

        Ok(())
    }
}

fn write_header(writer: &mut impl Write) -> std::io::Result<()> {
    writeln!(writer, "0")?;
    writeln!(writer, "SECTION")?;
    writeln!(writer, "2")?;
    writeln!(writer, "HEADER")?;

    writeln!(writer, "9")?;
    writeln!(writer, "$ACADVER")?;
    writeln!(writer, "1")?;
    writeln!(writer, "AC1009")?; // DXF R12

    // Units = millimeters
    writeln!(writer, "9")?;
    writeln!(writer, "$INSUNITS")?;
    writeln!(writer, "70")?;
    writeln!(writer, "4")?;

    writeln!(writer, "0")?;
    writeln!(writer, "ENDSEC")?;

    Ok(())
}

fn write_tables(writer: &mut impl Write) -> std::io::Result<()> {
    writeln!(writer, "0")?;
    writeln!(writer, "SECTION")?;
    writeln!(writer, "2")?;
    writeln!(writer, "TABLES")?;

    write_ltype_table(writer)?;
    write_layer_table(writer)?;

    writeln!(writer, "0")?;
    writeln!(writer, "ENDSEC")?;

    Ok(())
}

fn write_ltype_table(writer: &mut impl Write) -> std::io::Result<()> {
    writeln!(writer, "0")?;
    writeln!(writer, "TABLE")?;
    writeln!(writer, "2")?;
    writeln!(writer, "LTYPE")?;
    writeln!(writer, "70")?;
    writeln!(writer, "2")?;

    writeln!(writer, "0")?;
    writeln!(writer, "LTYPE")?;
    writeln!(writer, "2")?;
    writeln!(writer, "CONTINUOUS")?;
    writeln!(writer, "70")?;
    writeln!(writer, "0")?;
    writeln!(writer, "3")?;
    writeln!(writer, "Solid line")?;
    writeln!(writer, "72")?;
    writeln!(writer, "65")?;
    writeln!(writer, "73")?;
    writeln!(writer, "0")?;
    writeln!(writer, "40")?;
    writeln!(writer, "0.0")?;

    // Center-style dash: long dash, gap, short dash, gap
    writeln!(writer, "0")?;
    writeln!(writer, "LTYPE")?;
    writeln!(writer, "2")?;
    writeln!(writer, "DASHED")?;
    writeln!(writer, "70")?;
    writeln!(writer, "0")?;
    writeln!(writer, "3")?;
    writeln!(writer, "Dash dot __ . __ .")?;
    writeln!(writer, "72")?;
    writeln!(writer, "65")?;
    writeln!(writer, "73")?;
    writeln!(writer, "4")?;
    writeln!(writer, "40")?;
    writeln!(writer, "7.0")?;
    for element in [4.0, -1.0, 1.0, -1.0] {
        writeln!(writer, "49")?;
        writeln!(writer, "{:.1}", element)?;
    }

    writeln!(writer, "0")?;
    writeln!(writer, "ENDTAB")?;

    Ok(())
}

fn write_layer_table(writer: &mut impl Write) -> std::io::Result<()> {
    writeln!(writer, "0")?;
    writeln!(writer, "TABLE")?;
    writeln!(writer, "2")?;
    writeln!(writer, "LAYER")?;
    writeln!(writer, "70")?;
    writeln!(writer, "{}", Layer::ALL.len())?;

    for layer in Layer::ALL {
        writeln!(writer, "0")?;
        writeln!(writer, "LAYER")?;
        writeln!(writer, "2")?;
        writeln!(writer, "{}", layer.name())?;
        writeln!(writer, "70")?;
        writeln!(writer, "0")?;
        writeln!(writer, "62")?;
        writeln!(writer, "{}", layer.aci_color())?;
        writeln!(writer, "6")?;
        writeln!(
            writer,
            "{}",
            if layer.is_dashed() { "DASHED" } else { "CONTINUOUS" }
        )?;
    }

    writeln!(writer, "0")?;
    writeln!(writer, "ENDTAB")?;

    Ok(())
}

fn write_point(writer: &mut impl Write, code: u8, p: &Point2D) -> std::io::Result<()> {
    writeln!(writer, "{}", code)?;
    writeln!(writer, "{:.6}", p.x)?;
    writeln!(writer, "{}", code + 10)?;
    writeln!(writer, "{:.6}", p.y)?;
    Ok(())
}

fn write_entity(writer: &mut impl Write, entity: &Entity) -> std::io::Result<()> {
    let layer = entity.layer().name();
    match entity {
        Entity::Line { start, end, .. } => {
            writeln!(writer, "0")?;
            writeln!(writer, "LINE")?;
            writeln!(writer, "8")?;
            writeln!(writer, "{}", layer)?;
            write_point(writer, 10, start)?;
            write_point(writer, 11, end)?;
        }
        Entity::Polyline { points, closed, .. } => {
            if points.is_empty() {
                return Ok(());
            }
            // R12 has no LWPOLYLINE: POLYLINE header, VERTEX list, SEQEND.
            writeln!(writer, "0")?;
            writeln!(writer, "POLYLINE")?;
            writeln!(writer, "8")?;
            writeln!(writer, "{}", layer)?;
            writeln!(writer, "66")?;
            writeln!(writer, "1")?;
            writeln!(writer, "70")?;
            writeln!(writer, "{}", if *closed { 1 } else { 0 })?;
            for point in points {
                writeln!(writer, "0")?;
                writeln!(writer, "VERTEX")?;
                writeln!(writer, "8")?;
                writeln!(writer, "{}", layer)?;
                write_point(writer, 10, point)?;
            }
            writeln!(writer, "0")?;
            writeln!(writer, "SEQEND")?;
            writeln!(writer, "8")?;
            writeln!(writer, "{}", layer)?;
        }
        Entity::Arc {
            center,
            radius,
            start_angle,
            end_angle,
            ..
        } => {
            writeln!(writer, "0")?;
            writeln!(writer, "ARC")?;
            writeln!(writer, "8")?;
            writeln!(writer, "{}", layer)?;
            write_point(writer, 10, center)?;
            writeln!(writer, "40")?;
            writeln!(writer, "{:.6}", radius)?;
            writeln!(writer, "50")?;
            writeln!(writer, "{:.6}", start_angle.rem_euclid(360.0))?;
            writeln!(writer, "51")?;
            writeln!(writer, "{:.6}", end_angle.rem_euclid(360.0))?;
        }
        Entity::Text {
            position,
            text,
            height,
            ..
        } => {
            writeln!(writer, "0")?;
            writeln!(writer, "TEXT")?;
            writeln!(writer, "8")?;
            writeln!(writer, "{}", layer)?;
            write_point(writer, 10, position)?;
            writeln!(writer, "40")?;
            writeln!(writer, "{:.6}", height)?;
            writeln!(writer, "1")?;
            writeln!(writer, "{}", dxf_text(text))?;
            // Centered: the alignment point carries the position.
            writeln!(writer, "72")?;
            writeln!(writer, "1")?;
            write_point(writer, 11, position)?;
        }
    }
    Ok(())
}

/// R12 files are not UTF-8; map the symbols used in labels to control codes.
fn dxf_text(text: &str) -> String {
    text.replace('°', "%%d").replace('Ø', "%%c")
}
