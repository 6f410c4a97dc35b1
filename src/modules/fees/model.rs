pub use campusdesk_models::fees::{
    CreateFeeStructureDto, FeeStructure, FeeStructureFilterParams, PaginatedFeeStructuresResponse,
    UpdateFeeStructureDto,
};
