use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::fs;
use std::io::Write;
use std::{fs::File, path::Path};
use uuid::Uuid;

use super::PaperService;
use crate::config::AppConfig;
use crate::errors::QPSystemError;
use crate::middlewares::RequireJWT;
use crate::models::audit::entities::actions;
use crate::models::papers::entities::ExamType;
use crate::models::papers::requests::CreatePaperData;
use crate::models::papers::responses::PaperResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::audit;
use crate::utils::validate::validate_set_label;
use crate::utils::validate_magic_bytes;

/// 上传过程中逐步收集的表单数据
#[derive(Default)]
struct UploadForm {
    subject_id: Option<i64>,
    exam_type: Option<ExamType>,
    set_label: Option<String>,
    deadline: Option<chrono::DateTime<chrono::Utc>>,
    stored_name: Option<String>,
    file_size: i64,
}

/// 读取文本字段内容
async fn read_text_field(field: &mut actix_multipart::Field) -> Result<String, actix_web::Error> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.next().await {
        buf.extend_from_slice(&chunk?);
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// 删除已落盘的部分文件（守卫失败时回收）
fn discard_stored_file(upload_dir: &str, form: &UploadForm) {
    if let Some(ref stored_name) = form.stored_name {
        let _ = fs::remove_file(format!("{upload_dir}/{stored_name}"));
    }
}

pub async fn upload_paper(
    service: &PaperService,
    req: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();
    let upload_dir = &config.upload.dir;
    let max_size = config.upload.max_size;
    let allowed_types = &config.upload.allowed_types;

    let user = match RequireJWT::extract_user_claims(req) {
        Some(u) => u,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    // 确保上传目录存在
    if !Path::new(upload_dir).exists()
        && let Err(e) = fs::create_dir_all(upload_dir)
    {
        tracing::error!("{}", QPSystemError::file_operation(format!("{e}")));
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                ErrorCode::PaperUploadFailed,
                "创建上传目录失败",
            )),
        );
    }

    let mut form = UploadForm::default();

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        match name.as_str() {
            "subject_id" => {
                let text = read_text_field(&mut field).await?;
                form.subject_id = text.trim().parse::<i64>().ok();
            }
            "exam_type" => {
                let text = read_text_field(&mut field).await?;
                form.exam_type = text.trim().parse::<ExamType>().ok();
            }
            "set_label" => {
                form.set_label = Some(read_text_field(&mut field).await?);
            }
            "deadline" => {
                let text = read_text_field(&mut field).await?;
                form.deadline = chrono::DateTime::parse_from_rfc3339(text.trim())
                    .ok()
                    .map(|dt| dt.with_timezone(&chrono::Utc));
            }
            "file" => {
                if form.stored_name.is_some() {
                    discard_stored_file(upload_dir, &form);
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::MultifileUploadNotAllowed,
                        "一次只能上传一份试卷",
                    )));
                }

                // 扩展名校验（试卷只开放 .pdf）
                let original_name = content_disposition
                    .and_then(|cd| cd.get_filename())
                    .map(|s| s.to_string())
                    .unwrap_or_default();
                let extension = Path::new(&original_name)
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| format!(".{}", ext.to_lowercase()))
                    .unwrap_or_default();

                if !allowed_types.iter().any(|t| t.to_lowercase() == extension) {
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::FileTypeNotAllowed,
                        "试卷必须是 PDF 文件",
                    )));
                }

                // 第一个 chunk 先验魔术字节，再创建文件
                let first_chunk = match field.next().await {
                    Some(chunk) => chunk?,
                    None => {
                        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                            ErrorCode::FileNotFound,
                            "上传的文件为空",
                        )));
                    }
                };

                if !validate_magic_bytes(&first_chunk, &extension) {
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::FileTypeNotAllowed,
                        "文件内容与扩展名不匹配",
                    )));
                }

                let stored_name =
                    format!("{}-{}.bin", chrono::Utc::now().timestamp(), Uuid::new_v4());
                let file_path = format!("{upload_dir}/{stored_name}");
                let mut f = match File::create(&file_path) {
                    Ok(file) => file,
                    Err(e) => {
                        tracing::error!("{}", QPSystemError::file_operation(format!("{e}")));
                        return Ok(HttpResponse::InternalServerError().json(
                            ApiResponse::<()>::error_empty(
                                ErrorCode::PaperUploadFailed,
                                "文件创建失败",
                            ),
                        ));
                    }
                };

                let mut total_size: usize = first_chunk.len();
                f.write_all(&first_chunk)?;

                let mut aborted = false;
                while let Some(chunk) = field.next().await {
                    let data = chunk?;
                    total_size += data.len();
                    // 流式校验大小，超限立即中止并删除部分文件
                    if total_size > max_size {
                        aborted = true;
                        break;
                    }
                    f.write_all(&data)?;
                }

                if aborted {
                    let _ = fs::remove_file(&file_path);
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::FileSizeExceeded,
                        "试卷文件超过大小限制",
                    )));
                }

                form.stored_name = Some(stored_name);
                form.file_size = total_size as i64;
            }
            _ => {
                // 未知字段直接消费掉
                let _ = read_text_field(&mut field).await?;
            }
        }
    }

    // 表单完整性校验
    let Some(stored_name) = form.stored_name.clone() else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "未找到上传的试卷文件",
        )));
    };

    let (Some(subject_id), Some(exam_type)) = (form.subject_id, form.exam_type.clone()) else {
        discard_stored_file(upload_dir, &form);
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "subject_id 或 exam_type 缺失或无效",
        )));
    };

    let set_label = form.set_label.clone().unwrap_or_default();
    if let Err(msg) = validate_set_label(&set_label) {
        discard_stored_file(upload_dir, &form);
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }

    let storage = service.get_storage(req);

    // 上传守卫：科目必须分配给该教师
    match storage
        .is_subject_assigned_to_teacher(user.id, subject_id)
        .await
    {
        Ok(true) => {}
        Ok(false) => {
            discard_stored_file(upload_dir, &form);
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::SubjectNotAssigned,
                "只能为分配给自己的科目上传试卷",
            )));
        }
        Err(e) => {
            discard_stored_file(upload_dir, &form);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询科目分配失败: {e}"),
                )),
            );
        }
    }

    let paper = match storage
        .create_paper(CreatePaperData {
            subject_id,
            exam_type,
            set_label: set_label.trim().to_string(),
            deadline: form.deadline,
            uploaded_by: user.id,
            file_path: stored_name,
        })
        .await
    {
        Ok(paper) => paper,
        Err(e) => {
            discard_stored_file(upload_dir, &form);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::PaperUploadFailed,
                    format!("创建试卷记录失败: {e}"),
                )),
            );
        }
    };

    audit::record(
        &storage,
        user.id,
        actions::UPLOAD,
        "paper",
        Some(paper.id),
        Some(serde_json::json!({
            "subject_id": paper.subject_id,
            "exam_type": paper.exam_type.to_string(),
            "set_label": paper.set_label,
            "version": paper.version,
            "file_size": form.file_size,
        })),
    )
    .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(PaperResponse { paper }, "试卷上传成功")))
}
