use crate::domain::PropertyRecord;
use crate::errors::Result;
use crate::features::KeywordCategory;
use rust_xlsxwriter::{Workbook, Worksheet};
use std::path::Path;

const HEADERS: [&str; 27] = [
    "Address",
    "Details Link",
    "property_description",
    "has_luxury_keywords",
    "has_renovation_keywords",
    "has_view_keywords",
    "has_outdoor_keywords",
    "has_modern_keywords",
    "has_location_keywords",
    "latitude",
    "longitude",
    "walk_score",
    "nearest_elementary_rating",
    "nearest_middle_rating",
    "nearest_high_rating",
    "school_district",
    "distance_to_transit",
    "nearest_transit_type",
    "public_transit_score",
    "median_household_income",
    "population_density",
    "crime_index",
    "area_type",
    "location_score",
    "location_category",
    "source_id",
    "geocoded",
];

// Unknown values leave the cell blank.
fn write_opt_str(ws: &mut Worksheet, row: u32, col: u16, value: Option<&str>) -> Result<()> {
    if let Some(v) = value {
        ws.write_string(row, col, v)?;
    }
    Ok(())
}

fn write_opt_num(ws: &mut Worksheet, row: u32, col: u16, value: Option<f64>) -> Result<()> {
    if let Some(v) = value {
        ws.write_number(row, col, v)?;
    }
    Ok(())
}

fn write_record(ws: &mut Worksheet, r: u32, record: &PropertyRecord) -> Result<()> {
    let transit = record.transit.as_ref();
    let location = record.location.as_ref();

    ws.write_string(r, 0, &record.address)?;
    write_opt_str(ws, r, 1, record.details_link.as_deref())?;
    ws.write_string(r, 2, record.description_text())?;

    for (i, category) in KeywordCategory::ALL.iter().enumerate() {
        ws.write_number(r, 3 + i as u16, f64::from(record.keywords.flag(*category)))?;
    }

    write_opt_num(ws, r, 9, record.latitude())?;
    write_opt_num(ws, r, 10, record.longitude())?;
    write_opt_num(ws, r, 11, record.walk_score.map(f64::from))?;
    write_opt_num(ws, r, 12, record.schools.elementary.map(f64::from))?;
    write_opt_num(ws, r, 13, record.schools.middle.map(f64::from))?;
    write_opt_num(ws, r, 14, record.schools.high.map(f64::from))?;
    write_opt_str(ws, r, 15, record.schools.district.as_deref())?;
    write_opt_num(ws, r, 16, transit.map(|t| t.distance_km))?;
    write_opt_str(ws, r, 17, transit.map(|t| t.transit_type.as_str()))?;
    write_opt_num(ws, r, 18, transit.map(|t| f64::from(t.score)))?;
    write_opt_num(ws, r, 19, record.demographics.median_household_income.map(f64::from))?;
    write_opt_num(ws, r, 20, record.demographics.population_density.map(f64::from))?;
    write_opt_num(ws, r, 21, record.demographics.crime_index.map(f64::from))?;
    write_opt_str(ws, r, 22, record.demographics.area_type.as_deref())?;
    write_opt_num(ws, r, 23, location.map(|l| f64::from(l.score)))?;
    write_opt_str(ws, r, 24, location.map(|l| l.category.as_str()))?;
    ws.write_number(r, 25, record.id as f64)?;
    ws.write_string(r, 26, if record.coordinates.is_some() { "Yes" } else { "No" })?;

    Ok(())
}

fn build_workbook(records: &[PropertyRecord]) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Enriched listings")?;

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for (i, record) in records.iter().enumerate() {
        write_record(worksheet, (i + 1) as u32, record)?;
    }

    Ok(workbook)
}

pub fn enriched_xlsx_buffer(records: &[PropertyRecord]) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(records)?;
    Ok(workbook.save_to_buffer()?)
}

pub fn export_enriched_xlsx(records: &[PropertyRecord], path: &Path) -> Result<()> {
    let buffer = enriched_xlsx_buffer(records)?;
    std::fs::write(path, buffer)?;
    Ok(())
}
