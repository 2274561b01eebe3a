// Diesel schema for the statically-known admin table. The trading tables are
// introspected at request time and have no entry here.

diesel::table! {
    user (id) {
        id -> Integer,
        username -> Text,
        password -> Text,
    }
}
