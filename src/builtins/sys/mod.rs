mod date;
mod datetime;
mod instant;
mod time;
mod timedelta;
