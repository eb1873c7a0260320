pub(crate) mod date;
pub(crate) mod encode;
pub(crate) mod timezone;

pub(crate) use date::parse_date;
pub(crate) use encode::encode_uri_component;
pub(crate) use timezone::{RawTimestamp, Timezone, business_day, day_of_week};
