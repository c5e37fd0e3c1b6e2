//! Video engagement presentation.

use serde::Serialize;

use insights_core::formats::DateFormats;
use insights_db::models::videos as rows;

/// Summary for one video module. The stored course id is a lookup key, not
/// part of the published shape.
#[derive(Debug, Serialize)]
pub struct Video {
    pub pipeline_video_id: String,
    pub encoded_module_id: String,
    pub duration: Option<i32>,
    pub segment_length: i32,
    pub users_at_start: Option<i32>,
    pub users_at_end: Option<i32>,
    pub created: String,
}

impl Video {
    pub fn from_row(row: &rows::Video, formats: &DateFormats) -> Self {
        Self {
            pipeline_video_id: row.pipeline_video_id.clone(),
            encoded_module_id: row.encoded_module_id.clone(),
            duration: row.duration,
            segment_length: row.segment_length,
            users_at_start: row.users_at_start,
            users_at_end: row.users_at_end,
            created: formats.format_datetime(row.created),
        }
    }
}

/// One segment of a video's view timeline, keyed by position in the list.
#[derive(Debug, Serialize)]
pub struct VideoTimeline {
    pub segment: i32,
    pub num_users: i32,
    pub num_views: i32,
    pub created: String,
}

impl VideoTimeline {
    pub fn from_row(row: &rows::VideoTimeline, formats: &DateFormats) -> Self {
        Self {
            segment: row.segment,
            num_users: row.num_users,
            num_views: row.num_views,
            created: formats.format_datetime(row.created),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::*;

    #[test]
    fn video_summary_drops_the_course_key() {
        let formats = DateFormats::default();
        let presented = Video::from_row(
            &rows::Video {
                course_id: "edX/DemoX/Demo_Course".into(),
                pipeline_video_id: "edX/DemoX/Demo_Course|i4x-edX-DemoX-video-1".into(),
                encoded_module_id: "i4x-edX-DemoX-video-1".into(),
                duration: None,
                segment_length: 5,
                users_at_start: Some(50),
                users_at_end: None,
                created: Utc.with_ymd_and_hms(2014, 5, 29, 19, 7, 35).unwrap(),
            },
            &formats,
        );

        assert_eq!(
            serde_json::to_value(&presented).unwrap(),
            json!({
                "pipeline_video_id": "edX/DemoX/Demo_Course|i4x-edX-DemoX-video-1",
                "encoded_module_id": "i4x-edX-DemoX-video-1",
                "duration": null,
                "segment_length": 5,
                "users_at_start": 50,
                "users_at_end": null,
                "created": "2014-05-29T190735",
            })
        );
    }

    #[test]
    fn timeline_segments_keep_their_position() {
        let formats = DateFormats::default();
        let presented = VideoTimeline::from_row(
            &rows::VideoTimeline {
                pipeline_video_id: "v1".into(),
                segment: 2,
                num_users: 12,
                num_views: 16,
                created: Utc.with_ymd_and_hms(2014, 5, 29, 19, 7, 35).unwrap(),
            },
            &formats,
        );

        assert_eq!(presented.segment, 2);
        assert_eq!(presented.num_users, 12);
        assert_eq!(presented.num_views, 16);
    }
}
