//! In-memory stand-ins for the Postgres repositories and photo storage.
//!
//! `MemoryStore` implements every repository trait over one set of tables and
//! enforces the same RESTRICT foreign keys as the migrations.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::core::error::{AppError, Result};
use crate::features::cities::models::{City, CityFilter};
use crate::features::cities::repositories::CityRepository;
use crate::features::countries::models::Country;
use crate::features::countries::repositories::CountryRepository;
use crate::features::landmarks::models::{Landmark, LandmarkFilter};
use crate::features::landmarks::repositories::LandmarkRepository;
use crate::features::photos::models::{NewPhoto, Photo, PhotoParent};
use crate::features::photos::repositories::PhotoRepository;
use crate::features::regions::models::{
    GeoJson, GeoJsonUpsert, Region, RegionFilter, RegionInput,
};
use crate::features::regions::repositories::{GeoJsonRepository, RegionRepository};
use crate::features::reviews::models::{Review, ReviewFilter, ReviewInput};
use crate::features::reviews::repositories::ReviewRepository;
use crate::modules::storage::PhotoStorage;
use crate::shared::http_date::to_http_precision;

struct Table<T> {
    rows: Vec<T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

#[derive(Default)]
struct Tables {
    countries: Table<Country>,
    regions: Table<Region>,
    geojsons: Table<GeoJson>,
    cities: Table<City>,
    landmarks: Table<Landmark>,
    reviews: Table<Review>,
    landmark_photos: Table<Photo>,
    review_photos: Table<Photo>,
}

impl Tables {
    fn photos(&mut self, parent: PhotoParent) -> &mut Table<Photo> {
        match parent {
            PhotoParent::Landmark => &mut self.landmark_photos,
            PhotoParent::Review => &mut self.review_photos,
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    fail_photo_inserts: AtomicBool,
}

#[allow(dead_code)]
impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    fn now() -> DateTime<Utc> {
        to_http_precision(Utc::now())
    }

    pub fn add_country(&self, name: &str, latitude: f64, longitude: f64) -> Country {
        let mut tables = self.tables();
        let now = Self::now();
        let country = Country {
            id: tables.countries.next_id(),
            name: name.to_string(),
            latitude,
            longitude,
            created_at: now,
            updated_at: now,
        };
        tables.countries.rows.push(country.clone());
        country
    }

    pub fn add_region(&self, country_id: Option<i64>, name: &str) -> Region {
        let mut tables = self.tables();
        let now = Self::now();
        let region = Region {
            id: tables.regions.next_id(),
            country_id,
            name: name.to_string(),
            area: 100.0,
            population: 1_000,
            coordinates: None,
            created_at: now,
            updated_at: now,
        };
        tables.regions.rows.push(region.clone());
        region
    }

    /// Region with a chosen id, for fixtures that name one
    pub fn add_region_with_id(&self, id: i64, name: &str) -> Region {
        let mut tables = self.tables();
        let now = Self::now();
        let region = Region {
            id,
            country_id: None,
            name: name.to_string(),
            area: 100.0,
            population: 1_000,
            coordinates: None,
            created_at: now,
            updated_at: now,
        };
        tables.regions.last_id = tables.regions.last_id.max(id);
        tables.regions.rows.push(region.clone());
        region
    }

    pub fn add_city(&self, region_id: i64, name: &str, population: i64) -> City {
        let mut tables = self.tables();
        let now = Self::now();
        let city = City {
            id: tables.cities.next_id(),
            name: name.to_string(),
            area: 50.0,
            population,
            latitude: 0.0,
            longitude: 0.0,
            region_id,
            created_at: now,
            updated_at: now,
        };
        tables.cities.rows.push(city.clone());
        city
    }

    pub fn add_landmark(&self, city_id: i64, name: &str, landmark_type: &str) -> Landmark {
        let mut tables = self.tables();
        let now = Self::now();
        let landmark = Landmark {
            id: tables.landmarks.next_id(),
            name: name.to_string(),
            landmark_type: landmark_type.to_string(),
            information: String::new(),
            description: format!("{} description", name),
            latitude: 0.0,
            longitude: 0.0,
            city_id,
            created_at: now,
            updated_at: now,
        };
        tables.landmarks.rows.push(landmark.clone());
        landmark
    }

    pub fn add_review(&self, landmark_id: i64, device_id: &str, rating: i32) -> Review {
        let mut tables = self.tables();
        let now = Self::now();
        let review = Review {
            id: tables.reviews.next_id(),
            device_id: device_id.to_string(),
            name: format!("{} review", device_id),
            comment: String::new(),
            rating,
            landmark_id,
            created_at: now,
            updated_at: now,
        };
        tables.reviews.rows.push(review.clone());
        review
    }

    /// Delete a city the way the store would: RESTRICT while landmarks reference it
    pub fn remove_city(&self, id: i64) -> Result<bool> {
        let mut tables = self.tables();
        if tables.landmarks.rows.iter().any(|l| l.city_id == id) {
            return Err(AppError::still_referenced("Failed to delete city"));
        }
        let before = tables.cities.rows.len();
        tables.cities.rows.retain(|c| c.id != id);
        Ok(tables.cities.rows.len() < before)
    }

    pub fn region(&self, id: i64) -> Option<Region> {
        self.tables().regions.rows.iter().find(|r| r.id == id).cloned()
    }

    pub fn geojson_count(&self) -> usize {
        self.tables().geojsons.rows.len()
    }

    pub fn review_count(&self) -> usize {
        self.tables().reviews.rows.len()
    }

    /// Every photo row of a kind, soft-deleted ones included
    pub fn photo_rows(&self, parent: PhotoParent) -> Vec<Photo> {
        self.tables().photos(parent).rows.clone()
    }

    /// Make every following photo insert fail with a database error
    pub fn fail_photo_inserts(&self, fail: bool) {
        self.fail_photo_inserts.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl CountryRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Country>> {
        Ok(self.tables().countries.rows.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Country>> {
        Ok(self.tables().countries.rows.iter().find(|c| c.id == id).cloned())
    }
}

#[async_trait]
impl RegionRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Region>> {
        let mut regions = self.tables().regions.rows.clone();
        regions.sort_by_key(|r| r.id);
        Ok(regions)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Region>> {
        Ok(self.region(id))
    }

    async fn list_by_country(&self, country_id: i64) -> Result<Vec<Region>> {
        Ok(self
            .tables()
            .regions
            .rows
            .iter()
            .filter(|r| r.country_id == Some(country_id))
            .cloned()
            .collect())
    }

    async fn create(&self, input: &RegionInput) -> Result<Region> {
        let mut tables = self.tables();
        let now = Self::now();
        let region = Region {
            id: tables.regions.next_id(),
            country_id: input.country_id,
            name: input.name.clone(),
            area: input.area,
            population: input.population,
            coordinates: input.coordinates.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.regions.rows.push(region.clone());
        Ok(region)
    }

    async fn update(&self, id: i64, input: &RegionInput) -> Result<Option<Region>> {
        let mut tables = self.tables();
        let Some(region) = tables.regions.rows.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        region.country_id = input.country_id;
        region.name = input.name.clone();
        region.area = input.area;
        region.population = input.population;
        region.coordinates = input.coordinates.clone();
        region.updated_at = Self::now();
        Ok(Some(region.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut tables = self.tables();
        let referenced = tables.cities.rows.iter().any(|c| c.region_id == id)
            || tables.geojsons.rows.iter().any(|g| g.region_id == id);
        if referenced {
            return Err(AppError::still_referenced("Failed to delete region"));
        }
        let before = tables.regions.rows.len();
        tables.regions.rows.retain(|r| r.id != id);
        Ok(tables.regions.rows.len() < before)
    }

    async fn search_by_name(&self, name: &str) -> Result<Vec<Region>> {
        Ok(self
            .tables()
            .regions
            .rows
            .iter()
            .filter(|r| contains_ignore_case(&r.name, name))
            .cloned()
            .collect())
    }

    async fn filter(&self, filter: &RegionFilter) -> Result<Vec<Region>> {
        Ok(self
            .tables()
            .regions
            .rows
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    async fn touch(&self, id: i64, at: DateTime<Utc>) -> Result<()> {
        let mut tables = self.tables();
        if let Some(region) = tables.regions.rows.iter_mut().find(|r| r.id == id) {
            region.updated_at = region.updated_at.max(at);
        }
        Ok(())
    }
}

#[async_trait]
impl GeoJsonRepository for MemoryStore {
    async fn upsert(&self, record: &GeoJsonUpsert) -> Result<GeoJson> {
        let mut tables = self.tables();
        if !tables.regions.rows.iter().any(|r| r.id == record.region_id) {
            return Err(AppError::missing_reference("Failed to save GeoJSON"));
        }

        if let Some(existing) = tables
            .geojsons
            .rows
            .iter_mut()
            .find(|g| g.region_id == record.region_id)
        {
            existing.geojson_data = record.geojson_data.clone();
            existing.middle_point = record.middle_point.clone();
            existing.zoom = record.zoom;
            existing.updated_at = GeoJson::next_updated_at(Some(existing.updated_at), record.at);
            return Ok(existing.clone());
        }

        let geojson = GeoJson {
            id: tables.geojsons.next_id(),
            region_id: record.region_id,
            geojson_data: record.geojson_data.clone(),
            middle_point: record.middle_point.clone(),
            zoom: record.zoom,
            created_at: record.at,
            updated_at: record.at,
        };
        tables.geojsons.rows.push(geojson.clone());
        Ok(geojson)
    }

    async fn find_by_region(&self, region_id: i64) -> Result<Option<GeoJson>> {
        Ok(self
            .tables()
            .geojsons
            .rows
            .iter()
            .find(|g| g.region_id == region_id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<GeoJson>> {
        Ok(self.tables().geojsons.rows.clone())
    }
}

#[async_trait]
impl CityRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<City>> {
        Ok(self.tables().cities.rows.iter().find(|c| c.id == id).cloned())
    }

    async fn search_by_name(&self, name: &str) -> Result<Vec<City>> {
        Ok(self
            .tables()
            .cities
            .rows
            .iter()
            .filter(|c| contains_ignore_case(&c.name, name))
            .cloned()
            .collect())
    }

    async fn filter(&self, filter: &CityFilter) -> Result<Vec<City>> {
        Ok(self
            .tables()
            .cities
            .rows
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl LandmarkRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Landmark>> {
        Ok(self.tables().landmarks.rows.iter().find(|l| l.id == id).cloned())
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Landmark>> {
        Ok(self
            .tables()
            .landmarks
            .rows
            .iter()
            .filter(|l| {
                contains_ignore_case(&l.name, keyword)
                    || contains_ignore_case(&l.description, keyword)
            })
            .cloned()
            .collect())
    }

    async fn filter(&self, filter: &LandmarkFilter) -> Result<Vec<Landmark>> {
        Ok(self
            .tables()
            .landmarks
            .rows
            .iter()
            .filter(|l| filter.matches(l))
            .cloned()
            .collect())
    }

    async fn list_by_city(&self, city_id: i64) -> Result<Vec<Landmark>> {
        Ok(self
            .tables()
            .landmarks
            .rows
            .iter()
            .filter(|l| l.city_id == city_id)
            .cloned()
            .collect())
    }

    async fn list_by_region(&self, region_id: i64) -> Result<Vec<Landmark>> {
        let tables = self.tables();
        Ok(tables
            .landmarks
            .rows
            .iter()
            .filter(|l| {
                tables
                    .cities
                    .rows
                    .iter()
                    .any(|c| c.id == l.city_id && c.region_id == region_id)
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ReviewRepository for MemoryStore {
    async fn create(&self, input: &ReviewInput) -> Result<Review> {
        let mut tables = self.tables();
        if !(1..=5).contains(&input.rating) {
            return Err(AppError::Validation(
                "Failed to create review: rating out of range".to_string(),
            ));
        }
        if !tables.landmarks.rows.iter().any(|l| l.id == input.landmark_id) {
            return Err(AppError::missing_reference("Failed to create review"));
        }

        let now = Self::now();
        let review = Review {
            id: tables.reviews.next_id(),
            device_id: input.device_id.clone(),
            name: input.name.clone(),
            comment: input.comment.clone(),
            rating: input.rating,
            landmark_id: input.landmark_id,
            created_at: now,
            updated_at: now,
        };
        tables.reviews.rows.push(review.clone());
        Ok(review)
    }

    async fn list_by_landmark(&self, landmark_id: i64) -> Result<Vec<Review>> {
        Ok(self
            .tables()
            .reviews
            .rows
            .iter()
            .filter(|r| r.landmark_id == landmark_id)
            .cloned()
            .collect())
    }

    async fn count_by_landmark(&self, landmark_id: i64) -> Result<i64> {
        let reviews = self.list_by_landmark(landmark_id).await?;
        Ok(reviews.len() as i64)
    }

    async fn average_rating(&self, landmark_id: i64) -> Result<f64> {
        let reviews = self.list_by_landmark(landmark_id).await?;
        if reviews.is_empty() {
            return Ok(0.0);
        }
        let sum: i64 = reviews.iter().map(|r| i64::from(r.rating)).sum();
        Ok(sum as f64 / reviews.len() as f64)
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Review>> {
        Ok(self
            .tables()
            .reviews
            .rows
            .iter()
            .filter(|r| {
                contains_ignore_case(&r.name, keyword)
                    || contains_ignore_case(&r.comment, keyword)
                    || r.rating.to_string().contains(keyword)
            })
            .cloned()
            .collect())
    }

    async fn filter(&self, filter: &ReviewFilter) -> Result<Vec<Review>> {
        Ok(self
            .tables()
            .reviews
            .rows
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    async fn list_by_device(&self, device_id: &str) -> Result<Vec<Review>> {
        Ok(self
            .tables()
            .reviews
            .rows
            .iter()
            .filter(|r| r.device_id == device_id)
            .cloned()
            .collect())
    }

    async fn find_by_device_and_landmark(
        &self,
        device_id: &str,
        landmark_id: i64,
    ) -> Result<Option<Review>> {
        Ok(self
            .tables()
            .reviews
            .rows
            .iter()
            .rev()
            .find(|r| r.device_id == device_id && r.landmark_id == landmark_id)
            .cloned())
    }
}

#[async_trait]
impl PhotoRepository for MemoryStore {
    async fn parent_label(&self, parent: PhotoParent, parent_id: i64) -> Result<Option<String>> {
        let tables = self.tables();
        Ok(match parent {
            PhotoParent::Landmark => tables
                .landmarks
                .rows
                .iter()
                .find(|l| l.id == parent_id)
                .map(|l| l.name.clone()),
            PhotoParent::Review => tables
                .reviews
                .rows
                .iter()
                .find(|r| r.id == parent_id)
                .map(|r| r.device_id.clone()),
        })
    }

    async fn count_for_parent(&self, parent: PhotoParent, parent_id: i64) -> Result<i64> {
        let mut tables = self.tables();
        let count = tables
            .photos(parent)
            .rows
            .iter()
            .filter(|p| p.parent_id == parent_id)
            .count();
        Ok(count as i64)
    }

    async fn insert(&self, parent: PhotoParent, photo: &NewPhoto) -> Result<Photo> {
        if self.fail_photo_inserts.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }

        let mut tables = self.tables();
        let parent_exists = match parent {
            PhotoParent::Landmark => tables.landmarks.rows.iter().any(|l| l.id == photo.parent_id),
            PhotoParent::Review => tables.reviews.rows.iter().any(|r| r.id == photo.parent_id),
        };
        if !parent_exists {
            return Err(AppError::missing_reference("Failed to record photo"));
        }

        let table = tables.photos(parent);
        let row = Photo {
            id: table.next_id(),
            parent_id: photo.parent_id,
            name: photo.name.clone(),
            path: photo.path.clone(),
            created_at: photo.at,
            updated_at: photo.at,
            deleted_at: None,
        };
        table.rows.push(row.clone());
        Ok(row)
    }

    async fn list(&self, parent: PhotoParent) -> Result<Vec<Photo>> {
        Ok(self
            .tables()
            .photos(parent)
            .rows
            .iter()
            .filter(|p| p.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn list_for_parent(&self, parent: PhotoParent, parent_id: i64) -> Result<Vec<Photo>> {
        Ok(self
            .tables()
            .photos(parent)
            .rows
            .iter()
            .filter(|p| p.parent_id == parent_id && p.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn find(&self, parent: PhotoParent, id: i64) -> Result<Option<Photo>> {
        Ok(self
            .tables()
            .photos(parent)
            .rows
            .iter()
            .find(|p| p.id == id && p.deleted_at.is_none())
            .cloned())
    }

    async fn soft_delete(&self, parent: PhotoParent, id: i64, at: DateTime<Utc>) -> Result<bool> {
        let mut tables = self.tables();
        match tables
            .photos(parent)
            .rows
            .iter_mut()
            .find(|p| p.id == id && p.deleted_at.is_none())
        {
            Some(photo) => {
                photo.deleted_at = Some(at);
                photo.updated_at = at;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

pub const MEMORY_LOCATION_PREFIX: &str = "memory://";

/// Photo storage kept in a map; locations are `memory://{key}`
#[derive(Default)]
pub struct MemoryPhotoStorage {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    fail_puts: AtomicBool,
}

#[allow(dead_code)]
impl MemoryPhotoStorage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Occupy a key as if another writer had stored it
    pub fn occupy(&self, key: &str) {
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), Vec::new());
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl PhotoStorage for MemoryPhotoStorage {
    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.objects.lock().unwrap().contains_key(key))
    }

    async fn put(&self, key: &str, data: Vec<u8>, _content_type: &str) -> Result<String> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(AppError::Internal(format!("Failed to upload '{}'", key)));
        }
        let mut objects = self.objects.lock().unwrap();
        if objects.contains_key(key) {
            return Err(AppError::Internal(format!("'{}' already exists", key)));
        }
        objects.insert(key.to_string(), data);
        Ok(format!("{}{}", MEMORY_LOCATION_PREFIX, key))
    }

    async fn remove(&self, location: &str) -> Result<()> {
        let key = location
            .strip_prefix(MEMORY_LOCATION_PREFIX)
            .ok_or_else(|| AppError::Internal(format!("Unknown location '{}'", location)))?;
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }
}
