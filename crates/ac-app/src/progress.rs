#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrepStage {
    LoadingCase,
    CheckingCache,
    Sizing,
    WritingMeshInputs,
    WritingSolverInputs,
    WritingNamelist,
    StagingSpecies,
    BuildingCommand,
    SavingManifest,
    Completed,
}

impl PrepStage {
    pub fn label(self) -> &'static str {
        match self {
            PrepStage::LoadingCase => "loading case",
            PrepStage::CheckingCache => "checking cache",
            PrepStage::Sizing => "sizing boundary layer",
            PrepStage::WritingMeshInputs => "writing mesh inputs",
            PrepStage::WritingSolverInputs => "writing solver inputs",
            PrepStage::WritingNamelist => "writing namelist",
            PrepStage::StagingSpecies => "staging species files",
            PrepStage::BuildingCommand => "building solver command",
            PrepStage::SavingManifest => "saving manifest",
            PrepStage::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PrepProgressEvent {
    pub stage: PrepStage,
    pub elapsed_wall_s: f64,
    pub message: Option<String>,
}

impl PrepProgressEvent {
    pub fn stage(stage: PrepStage, elapsed_wall_s: f64, message: Option<String>) -> Self {
        Self {
            stage,
            elapsed_wall_s,
            message,
        }
    }
}
