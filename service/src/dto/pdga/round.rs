use itertools::Itertools;
use serde::Deserialize;
use serde_with::{serde_as, VecSkipError};

use super::api_player::ApiPlayer;
use crate::dto::RawResult;

#[derive(Deserialize, Debug)]
pub(crate) struct ApiRes {
    data: RoundFromApi,
}

#[serde_as]
#[derive(Deserialize, Debug)]
struct RoundFromApi {
    #[serde_as(as = "VecSkipError<_>")]
    #[serde(default)]
    scores: Vec<ApiPlayer>,
}

impl ApiRes {
    pub(crate) fn into_raw_results(self) -> Vec<RawResult> {
        self.data
            .scores
            .into_iter()
            .filter_map(ApiPlayer::into_raw_result)
            .collect_vec()
    }
}
