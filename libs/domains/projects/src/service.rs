use axum::body::Bytes;
use domain_types::{ProjectType, TypeRepository};
use image::ImageFormat;
use std::sync::Arc;
use storage::BlobStore;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::error::{ProjectError, ProjectResult, field_error};
use crate::models::{
    IMAGE_NAMESPACE, Page, PageRequest, Project, ProjectForm, ProjectRecord, ProjectQuery,
    TrashScope,
};
use crate::repository::ProjectRepository;
use crate::slug::slugify;

/// User-facing texts.
pub mod messages {
    pub const TITLE_REQUIRED: &str = "Il progetto deve avere un titolo";
    pub const TITLE_TAKEN: &str = "Esiste già un progetto con questo titolo";
    pub const DESCRIPTION_REQUIRED: &str = "Il progetto deve avere una descrizione";
    pub const NOT_AN_IMAGE: &str = "Il file inserito non è un immagine";
    pub const INVALID_TYPE: &str = "Il tipo non è valido o esistente";

    pub const CREATED: &str = "Progetto creato con successo";
    pub const UPDATED: &str = "Progetto modificato con successo";
    pub const RESTORED: &str = "Progetto ripristinato con successo";
    pub const PURGED: &str = "Progetto eliminato con successo";
    pub const TRASHED: &str = "Progetto eliminato";
    pub const UNDO_LABEL: &str = "ANNULLA";
}

/// A listing page together with the type choices for the filter.
#[derive(Debug, Clone)]
pub struct ProjectListing {
    pub page: Page<Project>,
    pub types: Vec<ProjectType>,
}

/// A form that passed every check.
struct ValidForm {
    title: String,
    description: String,
    type_id: Option<Uuid>,
    is_completed: bool,
    image: Option<ValidImage>,
}

struct ValidImage {
    bytes: Bytes,
    extension: &'static str,
}

/// Service layer for Project business logic
pub struct ProjectService<R: ProjectRepository> {
    repository: Arc<R>,
    types: Arc<dyn TypeRepository>,
    storage: Arc<dyn BlobStore>,
}

impl<R: ProjectRepository> ProjectService<R> {
    pub fn new(repository: R, types: Arc<dyn TypeRepository>, storage: Arc<dyn BlobStore>) -> Self {
        Self {
            repository: Arc::new(repository),
            types,
            storage,
        }
    }

    pub fn storage(&self) -> &dyn BlobStore {
        self.storage.as_ref()
    }

    /// One page of active projects plus every type.
    pub async fn list_projects(&self, query: &ProjectQuery) -> ProjectResult<ProjectListing> {
        let request = PageRequest::new(query.page());

        let page = match query.filter() {
            Some(filter) => self.repository.list(filter, request).await?,
            None => Page::empty(request),
        };

        Ok(ProjectListing {
            page,
            types: self.list_types().await?,
        })
    }

    pub async fn list_types(&self) -> ProjectResult<Vec<ProjectType>> {
        Ok(self.types.list().await?)
    }

    /// Active project by id
    pub async fn get_project(&self, id: Uuid) -> ProjectResult<Project> {
        self.repository
            .find(id, TrashScope::Active)
            .await?
            .ok_or(ProjectError::NotFound(id))
    }

    pub async fn create_project(&self, form: ProjectForm) -> ProjectResult<Project> {
        let form = self.validate_form(form, None).await?;
        let slug = slugify(&form.title);

        let image = match form.image {
            Some(image) => Some(self.store_image(&slug, image).await?),
            None => None,
        };

        let record = ProjectRecord {
            title: form.title,
            slug,
            description: form.description,
            image: image.clone(),
            is_completed: form.is_completed,
            type_id: form.type_id,
        };

        match self.repository.insert(record).await {
            Ok(project) => {
                tracing::info!(project_id = %project.id, slug = %project.slug, "Created project");
                Ok(project)
            }
            Err(err) => {
                if let Some(reference) = image {
                    self.discard_image(&reference).await;
                }
                Err(err)
            }
        }
    }

    /// Whole-record update; a new image replaces the stored one.
    pub async fn update_project(&self, id: Uuid, form: ProjectForm) -> ProjectResult<Project> {
        let existing = self.get_project(id).await?;
        let form = self.validate_form(form, Some(id)).await?;
        let slug = slugify(&form.title);

        let image = match form.image {
            Some(image) => {
                if let Some(previous) = existing.image.as_deref() {
                    self.storage.delete(previous).await?;
                }
                Some(self.store_image(&slug, image).await?)
            }
            None => existing.image,
        };

        let record = ProjectRecord {
            title: form.title,
            slug,
            description: form.description,
            image,
            is_completed: form.is_completed,
            type_id: form.type_id,
        };

        let project = self
            .repository
            .replace(id, record)
            .await?
            .ok_or(ProjectError::NotFound(id))?;

        tracing::info!(project_id = %id, "Updated project");
        Ok(project)
    }

    /// Moves an active project to the trash. The stored image stays.
    pub async fn delete_project(&self, id: Uuid) -> ProjectResult<Project> {
        let project = self
            .repository
            .soft_delete(id)
            .await?
            .ok_or(ProjectError::NotFound(id))?;

        tracing::info!(project_id = %id, "Moved project to trash");
        Ok(project)
    }

    pub async fn list_trashed(&self) -> ProjectResult<Vec<Project>> {
        self.repository.list_trashed().await
    }

    /// Takes a project out of the trash; an active project is returned unchanged.
    pub async fn restore_project(&self, id: Uuid) -> ProjectResult<Project> {
        let project = self
            .repository
            .restore(id)
            .await?
            .ok_or(ProjectError::NotFound(id))?;

        tracing::info!(project_id = %id, "Restored project");
        Ok(project)
    }

    /// Deletes the row for good. The stored image is not removed.
    pub async fn purge_project(&self, id: Uuid) -> ProjectResult<Project> {
        let project = self
            .repository
            .purge(id)
            .await?
            .ok_or(ProjectError::NotFound(id))?;

        if let Some(image) = project.image.as_deref() {
            tracing::warn!(project_id = %id, image, "Purged project left an orphaned image");
        }

        tracing::info!(project_id = %id, "Purged project");
        Ok(project)
    }

    /// Runs every check and reports all failing fields at once.
    async fn validate_form(&self, form: ProjectForm, except: Option<Uuid>) -> ProjectResult<ValidForm> {
        let mut errors = form.validate().err().unwrap_or_else(ValidationErrors::new);

        if let Some(title) = form.title.as_deref() {
            if self.repository.title_taken(title, except).await? {
                errors.add("title", field_error("unique", messages::TITLE_TAKEN));
            }
        }

        let image = match form.image {
            None => None,
            Some(file) => match image_extension(&file.bytes) {
                Some(extension) => Some(ValidImage {
                    bytes: file.bytes,
                    extension,
                }),
                None => {
                    errors.add("image", field_error("image", messages::NOT_AN_IMAGE));
                    None
                }
            },
        };

        let type_id = match form.type_id.as_deref() {
            None => None,
            Some(raw) => {
                let id = Uuid::parse_str(raw).ok();
                let exists = match id {
                    Some(id) => self.types.exists(id).await?,
                    None => false,
                };
                if !exists {
                    errors.add("type_id", field_error("exists", messages::INVALID_TYPE));
                }
                id.filter(|_| exists)
            }
        };

        let (Some(title), Some(description)) = (form.title, form.description) else {
            return Err(ProjectError::Validation(errors));
        };
        if !errors.field_errors().is_empty() {
            return Err(ProjectError::Validation(errors));
        }

        Ok(ValidForm {
            title,
            description,
            type_id,
            is_completed: form.is_completed,
            image,
        })
    }

    async fn store_image(&self, slug: &str, image: ValidImage) -> ProjectResult<String> {
        let name = format!("{slug}.{}", image.extension);
        let reference = self
            .storage
            .put(IMAGE_NAMESPACE, image.bytes.to_vec(), &name)
            .await?;

        tracing::debug!(reference = %reference, "Stored project image");
        Ok(reference)
    }

    async fn discard_image(&self, reference: &str) {
        if let Err(err) = self.storage.delete(reference).await {
            tracing::warn!(reference, error = %err, "Failed to remove image of unsaved project");
        }
    }
}

/// File extension for content recognised as a raster image.
fn image_extension(bytes: &[u8]) -> Option<&'static str> {
    let format = image::guess_format(bytes).ok()?;

    match format {
        ImageFormat::Jpeg
        | ImageFormat::Png
        | ImageFormat::Gif
        | ImageFormat::Bmp
        | ImageFormat::WebP => format.extensions_str().first().copied(),
        _ => None,
    }
}
