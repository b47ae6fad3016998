use services::Notice;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoticeVm {
    pub text: String,
    pub class: &'static str,
}

impl From<&Notice> for NoticeVm {
    fn from(notice: &Notice) -> Self {
        Self {
            text: notice.message(),
            class: if notice.is_error() {
                "notice notice--error"
            } else {
                "notice notice--success"
            },
        }
    }
}

#[must_use]
pub fn map_notices(notices: &[Notice]) -> Vec<NoticeVm> {
    notices.iter().map(NoticeVm::from).collect()
}
