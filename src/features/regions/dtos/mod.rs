mod geojson_dto;
mod region_dto;

pub use geojson_dto::{GeoJsonIdDto, GeoJsonRecordDto, GeoJsonResponseDto};
pub use region_dto::{
    RegionFilterQuery, RegionRequestDto, RegionResponseDto, RegionSearchQuery,
};
