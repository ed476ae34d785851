use std::collections::HashMap;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr, TransactionTrait,
    sea_query::OnConflict,
};
use uuid::Uuid;

use raisedup_api_schema::{
    courses, enrollments, lessons, payments, profiles, progress, quiz_questions, quiz_results,
    quizzes,
};
use raisedup_domain::role::ProfileRole;

use crate::domain::repository::{
    CourseRepository, EnrollmentRepository, LessonRepository, PaymentRepository,
    ProfileRepository, ProgressRepository, QuizRepository,
};
use crate::domain::types::{
    Course, CoursePatch, EnrollOutcome, Enrollment, EnrollmentWithCourse, Lesson, LessonPatch,
    NewQuiz, Payment, PaymentWithCourse, Profile, ProfilePatch, Progress, ProgressWithLesson,
    Quiz, QuizQuestion, QuizResult, QuizResultWithQuiz,
};
use crate::error::ApiError;

/// The given courses keyed by id. Unknown ids are absent from the map.
async fn courses_by_id(
    db: &DatabaseConnection,
    ids: impl IntoIterator<Item = Uuid>,
) -> Result<HashMap<Uuid, courses::Model>, ApiError> {
    let mut ids: Vec<Uuid> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let models = courses::Entity::find()
        .filter(courses::Column::Id.is_in(ids))
        .all(db)
        .await
        .context("load courses by id")?;
    Ok(models.into_iter().map(|m| (m.id, m)).collect())
}

// ── Profile repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProfileRepository {
    pub db: DatabaseConnection,
}

impl ProfileRepository for DbProfileRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, ApiError> {
        let model = profiles::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find profile by id")?;
        model.map(profile_from_model).transpose()
    }

    async fn create_if_absent(&self, profile: &Profile) -> Result<bool, ApiError> {
        let model = profiles::ActiveModel {
            id: Set(profile.id),
            email: Set(profile.email.clone()),
            name: Set(profile.name.clone()),
            role: Set(profile.role.as_str().to_owned()),
            avatar_url: Set(profile.avatar_url.clone()),
            created_at: Set(profile.created_at),
        };
        let inserted = profiles::Entity::insert(model)
            .on_conflict(
                OnConflict::column(profiles::Column::Id)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("create profile")?;
        Ok(inserted > 0)
    }

    async fn update(&self, id: Uuid, patch: &ProfilePatch) -> Result<Option<Profile>, ApiError> {
        let mut am = profiles::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(email) = &patch.email {
            am.email = Set(email.clone());
        }
        if let Some(name) = &patch.name {
            am.name = Set(name.clone());
        }
        if let Some(role) = patch.role {
            am.role = Set(role.as_str().to_owned());
        }
        if let Some(avatar_url) = &patch.avatar_url {
            am.avatar_url = Set(Some(avatar_url.clone()));
        }
        match am.update(&self.db).await {
            Ok(model) => profile_from_model(model).map(Some),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(anyhow::Error::new(e).context("update profile").into()),
        }
    }

    async fn list(&self) -> Result<Vec<Profile>, ApiError> {
        let models = profiles::Entity::find()
            .order_by_desc(profiles::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list profiles")?;
        models.into_iter().map(profile_from_model).collect()
    }
}

fn profile_from_model(model: profiles::Model) -> Result<Profile, ApiError> {
    let role = model
        .role
        .parse::<ProfileRole>()
        .with_context(|| format!("profile {} has unreadable role", model.id))?;
    Ok(Profile {
        id: model.id,
        email: model.email,
        name: model.name,
        role,
        avatar_url: model.avatar_url,
        created_at: model.created_at,
    })
}

// ── Course repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCourseRepository {
    pub db: DatabaseConnection,
}

impl CourseRepository for DbCourseRepository {
    async fn list(&self) -> Result<Vec<Course>, ApiError> {
        let models = courses::Entity::find()
            .order_by_desc(courses::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list courses")?;
        Ok(models.into_iter().map(course_from_model).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, ApiError> {
        let model = courses::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find course by id")?;
        Ok(model.map(course_from_model))
    }

    async fn create(&self, course: &Course) -> Result<(), ApiError> {
        courses::ActiveModel {
            id: Set(course.id),
            title: Set(course.title.clone()),
            description: Set(course.description.clone()),
            price: Set(course.price),
            thumbnail_url: Set(course.thumbnail_url.clone()),
            duration: Set(course.duration.clone()),
            instructor_id: Set(course.instructor_id),
            created_at: Set(course.created_at),
        }
        .insert(&self.db)
        .await
        .context("create course")?;
        Ok(())
    }

    async fn update_owned(
        &self,
        id: Uuid,
        instructor_id: Uuid,
        patch: &CoursePatch,
    ) -> Result<Option<Course>, ApiError> {
        let mut am = courses::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(title) = &patch.title {
            am.title = Set(title.clone());
        }
        if let Some(description) = &patch.description {
            am.description = Set(Some(description.clone()));
        }
        if let Some(price) = patch.price {
            am.price = Set(price);
        }
        if let Some(thumbnail_url) = &patch.thumbnail_url {
            am.thumbnail_url = Set(Some(thumbnail_url.clone()));
        }
        if let Some(duration) = &patch.duration {
            am.duration = Set(Some(duration.clone()));
        }
        let result = courses::Entity::update(am)
            .filter(courses::Column::InstructorId.eq(instructor_id))
            .exec(&self.db)
            .await;
        match result {
            Ok(model) => Ok(Some(course_from_model(model))),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(anyhow::Error::new(e).context("update course").into()),
        }
    }

    async fn delete_owned(&self, id: Uuid, instructor_id: Uuid) -> Result<bool, ApiError> {
        let result = courses::Entity::delete_many()
            .filter(courses::Column::Id.eq(id))
            .filter(courses::Column::InstructorId.eq(instructor_id))
            .exec(&self.db)
            .await
            .context("delete course")?;
        Ok(result.rows_affected > 0)
    }
}

fn course_from_model(model: courses::Model) -> Course {
    Course {
        id: model.id,
        title: model.title,
        description: model.description,
        price: model.price,
        thumbnail_url: model.thumbnail_url,
        duration: model.duration,
        instructor_id: model.instructor_id,
        created_at: model.created_at,
    }
}

// ── Lesson repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbLessonRepository {
    pub db: DatabaseConnection,
}

impl LessonRepository for DbLessonRepository {
    async fn list_by_course(&self, course_id: Uuid) -> Result<Vec<Lesson>, ApiError> {
        let models = lessons::Entity::find()
            .filter(lessons::Column::CourseId.eq(course_id))
            .order_by_asc(lessons::Column::OrderIndex)
            .all(&self.db)
            .await
            .context("list lessons by course")?;
        Ok(models.into_iter().map(lesson_from_model).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Lesson>, ApiError> {
        let model = lessons::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find lesson by id")?;
        Ok(model.map(lesson_from_model))
    }

    async fn create(&self, lesson: &Lesson) -> Result<(), ApiError> {
        lessons::ActiveModel {
            id: Set(lesson.id),
            course_id: Set(lesson.course_id),
            title: Set(lesson.title.clone()),
            video_url: Set(lesson.video_url.clone()),
            duration: Set(lesson.duration),
            order_index: Set(lesson.order_index),
            is_locked: Set(lesson.is_locked),
            created_at: Set(lesson.created_at),
        }
        .insert(&self.db)
        .await
        .context("create lesson")?;
        Ok(())
    }

    async fn update(&self, id: Uuid, patch: &LessonPatch) -> Result<Option<Lesson>, ApiError> {
        let mut am = lessons::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(title) = &patch.title {
            am.title = Set(title.clone());
        }
        if let Some(video_url) = &patch.video_url {
            am.video_url = Set(Some(video_url.clone()));
        }
        if let Some(duration) = patch.duration {
            am.duration = Set(Some(duration));
        }
        if let Some(order_index) = patch.order_index {
            am.order_index = Set(order_index);
        }
        if let Some(is_locked) = patch.is_locked {
            am.is_locked = Set(is_locked);
        }
        match am.update(&self.db).await {
            Ok(model) => Ok(Some(lesson_from_model(model))),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(anyhow::Error::new(e).context("update lesson").into()),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = lessons::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete lesson")?;
        Ok(result.rows_affected > 0)
    }

    async fn ids_by_course(&self, course_id: Uuid) -> Result<Vec<Uuid>, ApiError> {
        let ids = lessons::Entity::find()
            .select_only()
            .column(lessons::Column::Id)
            .filter(lessons::Column::CourseId.eq(course_id))
            .into_tuple::<Uuid>()
            .all(&self.db)
            .await
            .context("list lesson ids by course")?;
        Ok(ids)
    }
}

fn lesson_from_model(model: lessons::Model) -> Lesson {
    Lesson {
        id: model.id,
        course_id: model.course_id,
        title: model.title,
        video_url: model.video_url,
        duration: model.duration,
        order_index: model.order_index,
        is_locked: model.is_locked,
        created_at: model.created_at,
    }
}

// ── Enrollment repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEnrollmentRepository {
    pub db: DatabaseConnection,
}

impl EnrollmentRepository for DbEnrollmentRepository {
    async fn create(&self, user_id: Uuid, course_id: Uuid) -> Result<EnrollOutcome, ApiError> {
        let result = enrollments::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            course_id: Set(course_id),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(model) => Ok(EnrollOutcome::Created(enrollment_from_model(model))),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Ok(EnrollOutcome::AlreadyEnrolled)
            }
            Err(e) => Err(anyhow::Error::new(e).context("create enrollment").into()),
        }
    }

    async fn list_with_course(&self, user_id: Uuid) -> Result<Vec<EnrollmentWithCourse>, ApiError> {
        let rows = enrollments::Entity::find()
            .filter(enrollments::Column::UserId.eq(user_id))
            .order_by_desc(enrollments::Column::CreatedAt)
            .find_also_related(courses::Entity)
            .all(&self.db)
            .await
            .context("list enrollments with course")?;
        Ok(rows
            .into_iter()
            .filter_map(|(enrollment, course)| {
                Some(EnrollmentWithCourse {
                    enrollment: enrollment_from_model(enrollment),
                    course: course_from_model(course?),
                })
            })
            .collect())
    }

    async fn exists(&self, user_id: Uuid, course_id: Uuid) -> Result<bool, ApiError> {
        let count = enrollments::Entity::find()
            .filter(enrollments::Column::UserId.eq(user_id))
            .filter(enrollments::Column::CourseId.eq(course_id))
            .count(&self.db)
            .await
            .context("check enrollment")?;
        Ok(count > 0)
    }
}

fn enrollment_from_model(model: enrollments::Model) -> Enrollment {
    Enrollment {
        id: model.id,
        user_id: model.user_id,
        course_id: model.course_id,
        created_at: model.created_at,
    }
}

// ── Progress repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProgressRepository {
    pub db: DatabaseConnection,
}

impl ProgressRepository for DbProgressRepository {
    async fn list_for_lessons(
        &self,
        user_id: Uuid,
        lesson_ids: &[Uuid],
    ) -> Result<Vec<Progress>, ApiError> {
        let models = progress::Entity::find()
            .filter(progress::Column::UserId.eq(user_id))
            .filter(progress::Column::LessonId.is_in(lesson_ids.iter().copied()))
            .all(&self.db)
            .await
            .context("list progress for lessons")?;
        Ok(models.into_iter().map(progress_from_model).collect())
    }

    async fn upsert(
        &self,
        user_id: Uuid,
        lesson_id: Uuid,
        completed: bool,
    ) -> Result<Progress, ApiError> {
        let row = progress::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            lesson_id: Set(lesson_id),
            completed: Set(completed),
            completed_at: Set(completed.then(Utc::now)),
        };
        let model = progress::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([progress::Column::UserId, progress::Column::LessonId])
                    .update_columns([progress::Column::Completed, progress::Column::CompletedAt])
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await
            .context("upsert progress")?;
        Ok(progress_from_model(model))
    }

    async fn list_with_lessons(&self, user_id: Uuid) -> Result<Vec<ProgressWithLesson>, ApiError> {
        let rows = progress::Entity::find()
            .filter(progress::Column::UserId.eq(user_id))
            .find_also_related(lessons::Entity)
            .all(&self.db)
            .await
            .context("list progress with lessons")?;
        let courses =
            courses_by_id(&self.db, rows.iter().filter_map(|(_, l)| l.as_ref().map(|l| l.course_id)))
                .await?;
        Ok(rows
            .into_iter()
            .filter_map(|(row, lesson)| {
                let lesson = lesson?;
                let course_title = courses.get(&lesson.course_id)?.title.clone();
                Some(ProgressWithLesson {
                    progress: progress_from_model(row),
                    lesson_title: lesson.title,
                    course_id: lesson.course_id,
                    course_title,
                })
            })
            .collect())
    }
}

fn progress_from_model(model: progress::Model) -> Progress {
    Progress {
        id: model.id,
        user_id: model.user_id,
        lesson_id: model.lesson_id,
        completed: model.completed,
        completed_at: model.completed_at,
    }
}

// ── Quiz repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbQuizRepository {
    pub db: DatabaseConnection,
}

impl DbQuizRepository {
    async fn with_questions(&self, model: quizzes::Model) -> Result<Quiz, ApiError> {
        let questions = quiz_questions::Entity::find()
            .filter(quiz_questions::Column::QuizId.eq(model.id))
            .order_by_asc(quiz_questions::Column::OrderIndex)
            .all(&self.db)
            .await
            .context("list quiz questions")?;
        quiz_from_models(model, questions)
    }
}

impl QuizRepository for DbQuizRepository {
    async fn find_by_course(&self, course_id: Uuid) -> Result<Option<Quiz>, ApiError> {
        let model = quizzes::Entity::find()
            .filter(quizzes::Column::CourseId.eq(course_id))
            .order_by_asc(quizzes::Column::CreatedAt)
            .one(&self.db)
            .await
            .context("find quiz by course")?;
        match model {
            Some(model) => self.with_questions(model).await.map(Some),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Quiz>, ApiError> {
        let model = quizzes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find quiz by id")?;
        match model {
            Some(model) => self.with_questions(model).await.map(Some),
            None => Ok(None),
        }
    }

    async fn create_with_questions(&self, quiz: &NewQuiz) -> Result<Quiz, ApiError> {
        let (model, questions) = self
            .db
            .transaction::<_, (quizzes::Model, Vec<quiz_questions::Model>), DbErr>(|txn| {
                let quiz = quiz.clone();
                Box::pin(async move {
                    let model = quizzes::ActiveModel {
                        id: Set(Uuid::now_v7()),
                        course_id: Set(quiz.course_id),
                        title: Set(quiz.title),
                        description: Set(quiz.description),
                        passing_score: Set(quiz.passing_score),
                        attempts_allowed: Set(quiz.attempts_allowed),
                        created_at: Set(Utc::now()),
                    }
                    .insert(txn)
                    .await?;

                    let mut questions = Vec::with_capacity(quiz.questions.len());
                    for (index, q) in quiz.questions.into_iter().enumerate() {
                        let question = quiz_questions::ActiveModel {
                            id: Set(Uuid::now_v7()),
                            quiz_id: Set(model.id),
                            question: Set(q.question),
                            options: Set(serde_json::Value::from(q.options)),
                            correct_answer: Set(q.correct_answer),
                            order_index: Set(index as i32),
                        }
                        .insert(txn)
                        .await?;
                        questions.push(question);
                    }
                    Ok((model, questions))
                })
            })
            .await
            .context("create quiz with questions")?;
        quiz_from_models(model, questions)
    }

    async fn insert_result(&self, result: &QuizResult) -> Result<(), ApiError> {
        quiz_results::ActiveModel {
            id: Set(result.id),
            user_id: Set(result.user_id),
            quiz_id: Set(result.quiz_id),
            score: Set(result.score),
            total_questions: Set(result.total_questions),
            passed: Set(result.passed),
            submitted_at: Set(result.submitted_at),
        }
        .insert(&self.db)
        .await
        .context("insert quiz result")?;
        Ok(())
    }

    async fn list_results(&self, user_id: Uuid) -> Result<Vec<QuizResultWithQuiz>, ApiError> {
        let rows = quiz_results::Entity::find()
            .filter(quiz_results::Column::UserId.eq(user_id))
            .order_by_desc(quiz_results::Column::SubmittedAt)
            .find_also_related(quizzes::Entity)
            .all(&self.db)
            .await
            .context("list quiz results")?;
        let courses =
            courses_by_id(&self.db, rows.iter().filter_map(|(_, q)| q.as_ref().map(|q| q.course_id)))
                .await?;
        Ok(rows
            .into_iter()
            .filter_map(|(row, quiz)| {
                let quiz = quiz?;
                let course_title = courses.get(&quiz.course_id)?.title.clone();
                Some(QuizResultWithQuiz {
                    result: quiz_result_from_model(row),
                    quiz_title: quiz.title,
                    course_id: quiz.course_id,
                    course_title,
                })
            })
            .collect())
    }
}

fn quiz_from_models(
    model: quizzes::Model,
    questions: Vec<quiz_questions::Model>,
) -> Result<Quiz, ApiError> {
    let questions = questions
        .into_iter()
        .map(|q| -> Result<QuizQuestion, ApiError> {
            let options: Vec<String> = serde_json::from_value(q.options)
                .with_context(|| format!("decode options of quiz question {}", q.id))?;
            Ok(QuizQuestion {
                id: q.id,
                quiz_id: q.quiz_id,
                question: q.question,
                options,
                correct_answer: q.correct_answer,
                order_index: q.order_index,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Quiz {
        id: model.id,
        course_id: model.course_id,
        title: model.title,
        description: model.description,
        passing_score: model.passing_score,
        attempts_allowed: model.attempts_allowed,
        created_at: model.created_at,
        questions,
    })
}

fn quiz_result_from_model(model: quiz_results::Model) -> QuizResult {
    QuizResult {
        id: model.id,
        user_id: model.user_id,
        quiz_id: model.quiz_id,
        score: model.score,
        total_questions: model.total_questions,
        passed: model.passed,
        submitted_at: model.submitted_at,
    }
}

// ── Payment repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPaymentRepository {
    pub db: DatabaseConnection,
}

impl PaymentRepository for DbPaymentRepository {
    async fn create(&self, payment: &Payment) -> Result<(), ApiError> {
        payments::ActiveModel {
            id: Set(payment.id),
            user_id: Set(payment.user_id),
            course_id: Set(payment.course_id),
            amount: Set(payment.amount),
            status: Set(payment.status.clone()),
            transaction_id: Set(payment.transaction_id.clone()),
            created_at: Set(payment.created_at),
        }
        .insert(&self.db)
        .await
        .context("create payment")?;
        Ok(())
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<PaymentWithCourse>, ApiError> {
        let rows = payments::Entity::find()
            .filter(payments::Column::UserId.eq(user_id))
            .order_by_desc(payments::Column::CreatedAt)
            .find_also_related(courses::Entity)
            .all(&self.db)
            .await
            .context("list payments")?;
        Ok(rows
            .into_iter()
            .filter_map(|(payment, course)| {
                let course = course?;
                Some(PaymentWithCourse {
                    payment: Payment {
                        id: payment.id,
                        user_id: payment.user_id,
                        course_id: payment.course_id,
                        amount: payment.amount,
                        status: payment.status,
                        transaction_id: payment.transaction_id,
                        created_at: payment.created_at,
                    },
                    course_title: course.title,
                    course_thumbnail_url: course.thumbnail_url,
                })
            })
            .collect())
    }
}
