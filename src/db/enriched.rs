use crate::db::connection::Database;
use crate::domain::PropertyRecord;
use crate::errors::Result;
use crate::features::KeywordCategory;
use chrono::Utc;
use rusqlite::params;

/// Upserts one enriched record keyed by its source row id. Unknown values are stored as NULL.
pub fn save_enriched_record(db: &Database, record: &PropertyRecord, run_id: Option<i64>) -> Result<()> {
    let now = Utc::now().naive_utc();
    let flags = KeywordCategory::ALL.map(|c| record.keywords.flag(c));
    let transit = record.transit.as_ref();
    let location = record.location.as_ref();

    db.with_conn(|conn| {
        conn.execute(
            r#"
            INSERT INTO enriched_listings (
                source_id, run_id, address, details_link,
                property_description,
                has_luxury_keywords, has_renovation_keywords, has_view_keywords,
                has_outdoor_keywords, has_modern_keywords, has_location_keywords,
                latitude, longitude, walk_score,
                nearest_elementary_rating, nearest_middle_rating, nearest_high_rating, school_district,
                distance_to_transit, nearest_transit_type, public_transit_score,
                median_household_income, population_density, crime_index, area_type,
                location_score, location_category,
                enriched_at
            ) VALUES (
                ?1, ?2, ?3, ?4,
                ?5,
                ?6, ?7, ?8,
                ?9, ?10, ?11,
                ?12, ?13, ?14,
                ?15, ?16, ?17, ?18,
                ?19, ?20, ?21,
                ?22, ?23, ?24, ?25,
                ?26, ?27,
                ?28
            )
            ON CONFLICT(source_id) DO UPDATE SET
                run_id = excluded.run_id,
                address = excluded.address,
                details_link = excluded.details_link,
                property_description = excluded.property_description,
                has_luxury_keywords = excluded.has_luxury_keywords,
                has_renovation_keywords = excluded.has_renovation_keywords,
                has_view_keywords = excluded.has_view_keywords,
                has_outdoor_keywords = excluded.has_outdoor_keywords,
                has_modern_keywords = excluded.has_modern_keywords,
                has_location_keywords = excluded.has_location_keywords,
                latitude = excluded.latitude,
                longitude = excluded.longitude,
                walk_score = excluded.walk_score,
                nearest_elementary_rating = excluded.nearest_elementary_rating,
                nearest_middle_rating = excluded.nearest_middle_rating,
                nearest_high_rating = excluded.nearest_high_rating,
                school_district = excluded.school_district,
                distance_to_transit = excluded.distance_to_transit,
                nearest_transit_type = excluded.nearest_transit_type,
                public_transit_score = excluded.public_transit_score,
                median_household_income = excluded.median_household_income,
                population_density = excluded.population_density,
                crime_index = excluded.crime_index,
                area_type = excluded.area_type,
                location_score = excluded.location_score,
                location_category = excluded.location_category,
                enriched_at = excluded.enriched_at
            "#,
            params![
                record.id,
                run_id,
                record.address,
                record.details_link,
                record.description.as_ref().map(|d| d.as_text()),
                flags[0],
                flags[1],
                flags[2],
                flags[3],
                flags[4],
                flags[5],
                record.latitude(),
                record.longitude(),
                record.walk_score,
                record.schools.elementary,
                record.schools.middle,
                record.schools.high,
                record.schools.district,
                transit.map(|t| t.distance_km),
                transit.map(|t| t.transit_type.as_str()),
                transit.map(|t| t.score),
                record.demographics.median_household_income,
                record.demographics.population_density,
                record.demographics.crime_index,
                record.demographics.area_type,
                location.map(|l| l.score),
                location.map(|l| l.category.as_str()),
                now,
            ],
        )?;
        Ok(())
    })
}

pub fn count_enriched(db: &Database) -> Result<i64> {
    db.with_conn(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM enriched_listings", [], |row| row.get(0))?)
    })
}
