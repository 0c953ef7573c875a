//! User-facing text, per locale.

use metaprompt_config::Locale;

/// Every message the client prints on its own behalf.
#[derive(Debug)]
pub struct Strings {
    pub user_label: &'static str,
    pub model_label: &'static str,
    pub welcome: &'static str,
    pub help: &'static str,
    pub thinking: &'static str,
    pub busy: &'static str,
    pub fallback_reply: &'static str,
    pub error_generic: &'static str,
    pub error_key_missing: &'static str,
    pub error_key_invalid: &'static str,
    pub key_prompt: &'static str,
    pub key_entry_cancelled: &'static str,
    pub key_saved: &'static str,
    pub key_cleared: &'static str,
    pub key_none: &'static str,
    pub key_from_environment: &'static str,
    pub test_running: &'static str,
    pub test_ok: &'static str,
    pub test_failed: &'static str,
    pub reset_done: &'static str,
    pub attachment_marker: &'static str,
    pub attached: &'static str,
    pub detached: &'static str,
    pub nothing_attached: &'static str,
    pub unknown_command: &'static str,
    pub file_analysis_header: &'static str,
    pub file_analysis_instruction: &'static str,
    pub file_name_label: &'static str,
    pub file_content_label: &'static str,
}

pub static EN: Strings = Strings {
    user_label: "You",
    model_label: "Metaprompt",
    welcome: "Metaprompt: design the best prompt for your goal.\n\
              What do you want to achieve? Type /help for commands.",
    help: "Commands:\n  \
           /key            enter or pick an API key\n  \
           /key clear      forget the stored API key\n  \
           /key status     show which key is in use\n  \
           /test           test the API connection\n  \
           /attach <path>  attach a knowledge file to the next prompt\n  \
           /detach         drop the pending attachment\n  \
           /reset          start over with an empty conversation\n  \
           /status         session and token usage\n  \
           /quit           exit\n\
           Copy the final \"[Copy and use]\" block of a reply into ChatGPT, Claude or Gemini.",
    thinking: "Designing the optimal prompt...",
    busy: "Still waiting for the previous reply; input ignored.",
    fallback_reply: "Could not generate a response. Please try again.",
    error_generic: "**System error**: the request could not be processed.",
    error_key_missing: "**API key not set**: an API key is required to use the service. \
                        Enter one with /key.",
    error_key_invalid: "**API key error**: the configured API key is invalid or billing is not \
                        enabled for its project. Enter a new key with /key.",
    key_prompt: "Gemini API key (empty to cancel): ",
    key_entry_cancelled: "No key entered.",
    key_saved: "API key saved.",
    key_cleared: "API key removed.",
    key_none: "No API key configured.",
    key_from_environment: "from environment",
    test_running: "Testing the connection...",
    test_ok: "Connected. The service is ready to use.",
    test_failed: "Connection failed. Check the environment variable or the key's validity.",
    reset_done: "Conversation cleared.",
    attachment_marker: "Attached file",
    attached: "Attached",
    detached: "Attachment removed.",
    nothing_attached: "Nothing is attached.",
    unknown_command: "Unknown command:",
    file_analysis_header: "[System instruction: knowledge file analysis request]",
    file_analysis_instruction: "The user attached a reference file. Analyze the content and intent \
                                of the file below in depth and use it as key context when \
                                designing the prompt.",
    file_name_label: "File name",
    file_content_label: "File content",
};

pub static KO: Strings = Strings {
    user_label: "나",
    model_label: "메타프롬프트",
    welcome: "메타프롬프트: AI의 잠재력을 100% 끌어내는 최고의 프롬프트를 설계해 보세요.\n\
              어떤 목표를 이루고 싶으신가요? 명령어 목록은 /help 를 입력하세요.",
    help: "명령어:\n  \
           /key            API 키 입력 또는 선택\n  \
           /key clear      저장된 API 키 삭제\n  \
           /key status     사용 중인 키 확인\n  \
           /test           연결 테스트 수행\n  \
           /attach <경로>  다음 요청에 지식 파일 첨부\n  \
           /detach         첨부 취소\n  \
           /reset          처음으로 돌아가기\n  \
           /status         세션 및 토큰 사용량\n  \
           /quit           종료\n\
           답변 마지막의 \"[Copy and use]\" 블록 내용을 ChatGPT나 Claude에 붙여넣으세요.",
    thinking: "최적화 로직 설계 중...",
    busy: "이전 응답을 기다리는 중입니다. 입력이 무시되었습니다.",
    fallback_reply: "응답을 생성할 수 없습니다. 다시 시도해 주세요.",
    error_generic: "**시스템 오류**: 요청을 처리할 수 없습니다.",
    error_key_missing: "**API 키 미설정**: 서비스 이용을 위해 API 키 설정이 필요합니다. \
                        /key 명령으로 설정해 주세요.",
    error_key_invalid: "**API 키 유효성 오류**: 설정된 API 키가 올바르지 않거나 결제 설정이 \
                        활성화되지 않았습니다. /key 명령으로 키를 다시 설정해 주세요.",
    key_prompt: "Gemini API 키 (빈 값은 취소): ",
    key_entry_cancelled: "키가 입력되지 않았습니다.",
    key_saved: "API 키가 저장되었습니다.",
    key_cleared: "API 키가 삭제되었습니다.",
    key_none: "API 키가 설정되지 않았습니다.",
    key_from_environment: "환경 변수",
    test_running: "연결 테스트 수행 중...",
    test_ok: "정상 연결됨. 서비스를 이용할 수 있습니다.",
    test_failed: "연결 실패. 환경 변수나 키 유효성을 확인해 주세요.",
    reset_done: "대화가 초기화되었습니다.",
    attachment_marker: "파일 첨부",
    attached: "첨부됨",
    detached: "첨부가 취소되었습니다.",
    nothing_attached: "첨부된 파일이 없습니다.",
    unknown_command: "알 수 없는 명령어:",
    file_analysis_header: "[시스템 지침: 지식 파일 분석 요청]",
    file_analysis_instruction: "사용자가 참고용 파일을 첨부했습니다. 아래 파일의 내용과 의도를 \
                                심층 분석하여 프롬프트 설계 시 핵심 맥락으로 반영하십시오.",
    file_name_label: "파일명",
    file_content_label: "파일 내용",
};

pub fn for_locale(locale: Locale) -> &'static Strings {
    match locale {
        Locale::En => &EN,
        Locale::Ko => &KO,
    }
}
