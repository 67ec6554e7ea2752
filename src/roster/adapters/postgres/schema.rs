//! Diesel schema for class roster persistence.

diesel::table! {
    /// Class roster records; entries persist as one JSONB array so markers
    /// and per-entry histories are written atomically with the roster.
    class_rosters (id) {
        /// Class identifier.
        id -> Uuid,
        /// Owning teacher.
        owner -> Uuid,
        /// Membership entries payload.
        entries -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
