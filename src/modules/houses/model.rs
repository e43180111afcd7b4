pub use aristokrat_models::houses::{
    EntranceFilterParams, EntranceHouseRow, EntranceWithHouse, House,
};
