//! Diesel schema for assignment lifecycle persistence.

diesel::table! {
    /// Task records with flat lifecycle marker columns.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning teacher.
        owner -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional task category.
        #[max_length = 100]
        category -> Nullable<Varchar>,
        /// Optional submission deadline.
        deadline -> Nullable<Timestamptz>,
        /// Archive timestamp; set iff the task is archived.
        archived_at -> Nullable<Timestamptz>,
        /// Teacher that archived the task.
        archived_by -> Nullable<Uuid>,
        /// Student-view permission while archived.
        archived_student_view -> Nullable<Bool>,
        /// Deletion timestamp; set iff the task is soft-deleted.
        deleted_at -> Nullable<Timestamptz>,
        /// Teacher that soft-deleted the task.
        deleted_by -> Nullable<Uuid>,
        /// Append-only operation history payload.
        history -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Submission records dependent on tasks.
    submissions (id) {
        /// Submission identifier.
        id -> Uuid,
        /// Task the submission belongs to.
        task_id -> Uuid,
        /// Submitting student.
        student -> Uuid,
        /// Opaque submission payload.
        payload -> Jsonb,
        /// Submission timestamp.
        submitted_at -> Timestamptz,
    }
}
