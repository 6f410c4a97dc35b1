pub use campusdesk_models::fees::{
    CreatePaymentDto, PaginatedPaymentsResponse, Payment, PaymentFilterParams,
};
