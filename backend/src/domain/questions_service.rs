//! Read side for public question pages.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::ports::{
    AnswerRepository, AnswerWithTally, QuestionPage, QuestionRepository, QuestionsQuery,
    UserRepository, VoteRepository,
};
use super::repository_errors::{
    map_answer_error, map_question_error, map_user_error, map_vote_error,
};
use super::{Error, Question, QuestionId, UserId};

/// Shown when an author record can no longer be found.
const UNKNOWN_AUTHOR: &str = "unknown user";

/// Question read model implementing [`QuestionsQuery`].
#[derive(Clone)]
pub struct QuestionsService<Q, A, V, U> {
    questions: Arc<Q>,
    answers: Arc<A>,
    votes: Arc<V>,
    users: Arc<U>,
}

impl<Q, A, V, U> QuestionsService<Q, A, V, U> {
    /// Create a new service with the given repositories.
    pub fn new(questions: Arc<Q>, answers: Arc<A>, votes: Arc<V>, users: Arc<U>) -> Self {
        Self {
            questions,
            answers,
            votes,
            users,
        }
    }
}

impl<Q, A, V, U> QuestionsService<Q, A, V, U>
where
    U: UserRepository,
{
    async fn author_name(
        &self,
        cache: &mut HashMap<UserId, String>,
        id: &UserId,
    ) -> Result<String, Error> {
        if let Some(name) = cache.get(id) {
            return Ok(name.clone());
        }
        let name = self
            .users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .map_or_else(
                || UNKNOWN_AUTHOR.to_owned(),
                |user| user.display_name().to_string(),
            );
        cache.insert(*id, name.clone());
        Ok(name)
    }
}

#[async_trait]
impl<Q, A, V, U> QuestionsQuery for QuestionsService<Q, A, V, U>
where
    Q: QuestionRepository,
    A: AnswerRepository,
    V: VoteRepository,
    U: UserRepository,
{
    async fn recent_questions(&self, limit: usize) -> Result<Vec<Question>, Error> {
        self.questions
            .list_recent(limit)
            .await
            .map_err(map_question_error)
    }

    async fn question_page(&self, question_id: &QuestionId) -> Result<QuestionPage, Error> {
        let question = self
            .questions
            .find_by_id(question_id)
            .await
            .map_err(map_question_error)?
            .ok_or_else(|| Error::not_found(format!("question {question_id} not found")))?;

        let mut names = HashMap::new();
        let author_name = self.author_name(&mut names, &question.author_id).await?;

        let stored = self
            .answers
            .list_for_question(question_id)
            .await
            .map_err(map_answer_error)?;
        let mut answers = Vec::with_capacity(stored.len());
        for answer in stored {
            let tally = self
                .votes
                .tally(&answer.id)
                .await
                .map_err(map_vote_error)?;
            let author_name = self.author_name(&mut names, &answer.author_id).await?;
            answers.push(AnswerWithTally {
                answer,
                author_name,
                tally,
            });
        }

        Ok(QuestionPage {
            question,
            author_name,
            answers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        MockAnswerRepository, MockQuestionRepository, MockUserRepository, MockVoteRepository,
    };
    use crate::domain::test_fixtures::{answer_on, confirmed_user, question_by};
    use crate::domain::{ErrorCode, VoteTally};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn question_page_collects_answers_with_tallies() {
        let ada = confirmed_user("ada@example.com", "Ada Lovelace");
        let question = question_by(*ada.id());
        let first = answer_on(&question, *ada.id());
        let second = answer_on(&question, UserId::random());
        let first_id = first.id;
        let stored = vec![first, second];
        let page_question = question.clone();

        let mut questions = MockQuestionRepository::new();
        questions
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(page_question)));
        let mut answers = MockAnswerRepository::new();
        answers
            .expect_list_for_question()
            .return_once(move |_| Ok(stored));
        let mut votes = MockVoteRepository::new();
        votes.expect_tally().times(2).returning(move |id| {
            Ok(if *id == first_id {
                VoteTally::new(2)
            } else {
                VoteTally::new(-1)
            })
        });
        let ada_id = *ada.id();
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .times(2)
            .returning(move |id| Ok((*id == ada_id).then(|| ada.clone())));

        let service = QuestionsService::new(
            Arc::new(questions),
            Arc::new(answers),
            Arc::new(votes),
            Arc::new(users),
        );
        let page = service
            .question_page(&question.id)
            .await
            .expect("page loads");

        assert_eq!(page.question, question);
        assert_eq!(page.author_name, "Ada Lovelace");
        let summary: Vec<_> = page
            .answers
            .iter()
            .map(|a| (a.author_name.as_str(), a.tally.value()))
            .collect();
        assert_eq!(summary, vec![("Ada Lovelace", 2), (UNKNOWN_AUTHOR, -1)]);
    }

    #[rstest]
    #[tokio::test]
    async fn question_page_for_unknown_question_is_not_found() {
        let mut questions = MockQuestionRepository::new();
        questions.expect_find_by_id().return_once(|_| Ok(None));
        let service = QuestionsService::new(
            Arc::new(questions),
            Arc::new(MockAnswerRepository::new()),
            Arc::new(MockVoteRepository::new()),
            Arc::new(MockUserRepository::new()),
        );

        let error = service
            .question_page(&QuestionId::random())
            .await
            .expect_err("missing question");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn recent_questions_delegates_limit() {
        let mut questions = MockQuestionRepository::new();
        questions
            .expect_list_recent()
            .withf(|limit| *limit == 20)
            .return_once(|_| Ok(Vec::new()));
        let service = QuestionsService::new(
            Arc::new(questions),
            Arc::new(MockAnswerRepository::new()),
            Arc::new(MockVoteRepository::new()),
            Arc::new(MockUserRepository::new()),
        );

        let listed = service.recent_questions(20).await.expect("listed");
        assert!(listed.is_empty());
    }
}
